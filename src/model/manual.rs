/// Paginated owner's manual embedded via the `#page=<n>` fragment convention.
/// Out-of-range page requests clamp to the nearest bound.
#[derive(Debug, Clone)]
pub struct ManualViewer {
    path: String,
    total_pages: u32,
    current_page: u32,
    open: bool,
}

impl ManualViewer {
    pub fn new(path: impl Into<String>, total_pages: u32) -> Self {
        Self {
            path: path.into(),
            total_pages: total_pages.max(1),
            current_page: 1,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Open the viewer at the given page, clamped to 1..=total_pages.
    pub fn open_at(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.total_pages);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Viewer fragment URL for the current page
    pub fn fragment_url(&self) -> String {
        format!("{}#page={}", self.path, self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_clamps_to_bounds() {
        let mut manual = ManualViewer::new("manual/owner_manual.pdf", 400);
        manual.open_at(0);
        assert_eq!(manual.current_page(), 1);
        manual.open_at(9999);
        assert_eq!(manual.current_page(), 400);
        manual.open_at(42);
        assert_eq!(manual.current_page(), 42);
        assert!(manual.is_open());
    }

    #[test]
    fn test_paging_stops_at_bounds() {
        let mut manual = ManualViewer::new("manual.pdf", 3);
        manual.prev_page();
        assert_eq!(manual.current_page(), 1);
        manual.next_page();
        manual.next_page();
        manual.next_page();
        assert_eq!(manual.current_page(), 3);
    }

    #[test]
    fn test_fragment_url() {
        let mut manual = ManualViewer::new("manual/owner_manual.pdf", 400);
        manual.open_at(57);
        assert_eq!(manual.fragment_url(), "manual/owner_manual.pdf#page=57");
    }
}
