mod manual;
mod navigator;
mod selection;

pub use manual::ManualViewer;
pub use navigator::{Direction, FrameNavigator, FrameSequence, NavigatorConfig};
pub use selection::{scale_factors, RegionSelector, SelectionRect, MIN_SELECTION_SIZE};
