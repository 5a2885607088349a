use bevy::prelude::*;
use bevy_egui::egui;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::imaging::{self, CropOutput};
use crate::model::{FrameNavigator, FrameSequence, ManualViewer, RegionSelector};
use crate::net;
use super::config::AppConfig;
use super::types::{ActiveTab, ChatMessage, PendingChat};

pub struct AppState {
    pub config: AppConfig,
    pub active_tab: ActiveTab,

    // Turntable simulator
    pub navigator: FrameNavigator,
    pub sim_selector: RegionSelector,
    /// Frame path -> uploaded texture and natural size
    pub frame_texture_cache: HashMap<String, (egui::TextureHandle, (u32, u32))>,
    /// Frames that failed to load; a missing asset is a rendering failure
    /// only, logged once and drawn as a placeholder
    pub missing_frames: HashSet<String>,

    // Photo inspector
    pub inspector_selector: RegionSelector,
    pub source_image: Option<image::DynamicImage>,
    pub source_texture: Option<(egui::TextureHandle, (u32, u32))>,
    pub image_path_input: String,
    pub crop: Option<CropOutput>,
    pub crop_texture: Option<egui::TextureHandle>,
    pub explanation: Option<String>,
    pub explanation_pending: Option<Receiver<Result<String, String>>>,
    /// Loading indicator for the submit round-trip
    pub loading: bool,

    // Assistant
    pub chat_messages: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_pending: Option<PendingChat>,
    pub manual: ManualViewer,

    // Status message (message, when set)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::load())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let sequence = FrameSequence::new(
            config.frame_folder.clone(),
            config.frame_prefix.clone(),
            config.frame_extension.clone(),
            config.frame_count,
        );
        let navigator = FrameNavigator::new(sequence, config.navigator_config());
        let manual = ManualViewer::new(config.manual_path.clone(), config.manual_pages);
        let min_selection = config.min_selection_px;

        Self {
            config,
            active_tab: ActiveTab::Simulator,
            navigator,
            sim_selector: RegionSelector::new(min_selection),
            frame_texture_cache: HashMap::new(),
            missing_frames: HashSet::new(),
            inspector_selector: RegionSelector::new(min_selection),
            source_image: None,
            source_texture: None,
            image_path_input: String::new(),
            crop: None,
            crop_texture: None,
            explanation: None,
            explanation_pending: None,
            loading: false,
            chat_messages: vec![ChatMessage::bot(
                "Hi! I'm your virtual assistant for this vehicle. How can I help?",
                None,
            )],
            chat_input: String::new(),
            chat_pending: None,
            manual,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), std::time::Instant::now()));
    }

    /// Load a new source photo for the inspector. Any prior selection, crop
    /// and explanation refer to the old image and are discarded.
    pub fn load_source_image(&mut self, path: &str) -> Result<(), String> {
        let img = imaging::load_source_image(path)?;
        self.source_image = Some(img);
        self.source_texture = None; // re-uploaded on next frame
        self.inspector_selector.reset();
        self.crop = None;
        self.crop_texture = None;
        self.explanation = None;
        self.explanation_pending = None;
        self.loading = false;
        Ok(())
    }

    /// Submit the committed inspector selection: crop the source at display
    /// resolution and request an explanation for it.
    ///
    /// `client_size` is the size the source image is currently rendered at.
    pub fn submit_selection(&mut self, client_size: (f32, f32)) -> Result<(), String> {
        let rect = self
            .inspector_selector
            .committed_rect()
            .ok_or_else(|| "Please select a part of the image first".to_string())?;
        let source = self
            .source_image
            .as_ref()
            .ok_or_else(|| "No image loaded".to_string())?;

        self.loading = true;
        match imaging::extract_region(source, &rect, client_size) {
            Ok(crop) => {
                log::debug!(
                    "crop ready: {}x{}, {} base64 chars",
                    crop.size.0,
                    crop.size.1,
                    crop.base64_jpeg.len()
                );
                self.crop = Some(crop);
                self.crop_texture = None;
                self.explanation = None;
                self.explanation_pending = Some(net::request_explanation(
                    self.config.endpoint.clone(),
                    self.config.request_timeout(),
                ));
                Ok(())
            }
            Err(e) => {
                // Extraction failed: release the loading indicator before
                // surfacing the error
                self.loading = false;
                Err(e)
            }
        }
    }

    /// Send the current chat input to the assistant endpoint.
    pub fn send_chat_message(&mut self) {
        let message = self.chat_input.trim().to_string();
        if message.is_empty() || self.chat_pending.is_some() {
            return;
        }
        self.chat_input.clear();
        self.chat_messages.push(ChatMessage::user(message.clone()));
        let receiver = net::request_chat(
            self.config.endpoint.clone(),
            message.clone(),
            self.config.request_timeout(),
        );
        self.chat_pending = Some(PendingChat { message, receiver });
    }

    /// Poll in-flight network requests. Called once per UI frame; never blocks.
    pub fn poll_pending(&mut self) {
        self.poll_chat();
        self.poll_explanation();
    }

    fn poll_chat(&mut self) {
        let Some(pending) = &self.chat_pending else {
            return;
        };
        let outcome = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("chat worker disappeared".to_string()),
        };
        let message = pending.message.clone();
        self.chat_pending = None;
        match outcome {
            Ok(reply) => {
                self.chat_messages
                    .push(ChatMessage::bot(reply.response, reply.manual_page));
            }
            Err(e) => {
                log::warn!("assistant unavailable, answering locally: {}", e);
                let reply = net::fallback_reply(&message, self.manual.total_pages());
                self.chat_messages
                    .push(ChatMessage::bot(reply.response, reply.manual_page));
            }
        }
    }

    fn poll_explanation(&mut self) {
        let Some(receiver) = &self.explanation_pending else {
            return;
        };
        let outcome = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("explanation worker disappeared".to_string()),
        };
        self.explanation_pending = None;
        self.loading = false;
        match outcome {
            Ok(text) => self.explanation = Some(text),
            Err(e) => {
                log::warn!("{}", e);
                self.explanation =
                    Some("The explanation service is unavailable right now. Please try again later.".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn test_submit_without_selection_is_rejected() {
        let mut state = state();
        let err = state.submit_selection((500.0, 250.0)).unwrap_err();
        assert!(err.contains("select"));
        assert!(state.crop.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_failed_image_load_keeps_existing_selection() {
        let mut state = state();
        state.inspector_selector.begin_drag((0.0, 0.0));
        state.inspector_selector.drag_to((50.0, 50.0));
        assert!(state.inspector_selector.end_drag());

        // Load fails before anything is invalidated
        assert!(state.load_source_image("no/such/image.png").is_err());
        assert!(state.inspector_selector.committed_rect().is_some());
    }

    #[test]
    fn test_chat_transport_failure_falls_back_locally() {
        let mut state = state();
        let (tx, rx) = mpsc::channel();
        state.chat_pending = Some(PendingChat {
            message: "tell me about the battery".to_string(),
            receiver: rx,
        });
        tx.send(Err("connection refused".to_string())).unwrap();

        state.poll_pending();
        assert!(state.chat_pending.is_none());
        let last = state.chat_messages.last().unwrap();
        assert_eq!(last.manual_page, Some(38));
    }

    #[test]
    fn test_chat_success_appends_reply() {
        let mut state = state();
        let (tx, rx) = mpsc::channel();
        state.chat_pending = Some(PendingChat {
            message: "hi".to_string(),
            receiver: rx,
        });
        tx.send(Ok(crate::net::ChatReply {
            response: "hello there".to_string(),
            manual_page: Some(7),
        }))
        .unwrap();

        state.poll_pending();
        let last = state.chat_messages.last().unwrap();
        assert_eq!(last.text, "hello there");
        assert_eq!(last.manual_page, Some(7));
    }

    #[test]
    fn test_explanation_failure_clears_loading() {
        let mut state = state();
        let (tx, rx) = mpsc::channel();
        state.loading = true;
        state.explanation_pending = Some(rx);
        tx.send(Err("timed out".to_string())).unwrap();

        state.poll_pending();
        assert!(!state.loading);
        assert!(state.explanation.as_deref().unwrap_or("").contains("unavailable"));
    }

    #[test]
    fn test_empty_chat_input_is_ignored() {
        let mut state = state();
        state.chat_input = "   ".to_string();
        state.send_chat_message();
        assert!(state.chat_pending.is_none());
        assert_eq!(state.chat_messages.len(), 1); // just the greeting
    }
}
