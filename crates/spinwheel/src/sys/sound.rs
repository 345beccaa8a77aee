use gtk::prelude::*;
use gtk4 as gtk;
use std::path::Path;

/// Short cue played after an option is added. Playback problems are ignored.
pub struct AddSound {
    media: Option<gtk::MediaFile>,
}

impl AddSound {
    pub fn new(path: Option<&Path>) -> Self {
        let media = path
            .filter(|p| {
                let exists = p.exists();
                if !exists {
                    log::warn!("Add sound {} not found", p.display());
                }
                exists
            })
            .map(gtk::MediaFile::for_filename);
        Self { media }
    }

    pub fn play(&self) {
        let Some(media) = &self.media else {
            return;
        };
        if media.is_seekable() {
            media.seek(0);
        }
        media.play();
        if let Some(e) = media.error() {
            log::debug!("Add sound failed: {}", e);
        }
    }
}
