use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use memory_gallery::content;
use memory_gallery::media::audio::MusicPlayer;
use memory_gallery::media::upload::{self, PHOTO_EXTENSIONS};
use memory_gallery::state::device::DeviceState;
use memory_gallery::state::{ImageSource, ItemId, MemoryEdit, MemoryRecord, Settled};
use memory_gallery::{Config, Gallery, RemoteStore, StoreError, SupabaseStore, UploadError};

mod ui;

use ui::gallery::{GalleryView, UploadPanel};
use ui::Picture;

/// Main application state
struct MemoryGallery {
    config: Config,
    /// The memories on display
    gallery: Gallery,
    /// None when no backend is configured
    store: Option<Arc<SupabaseStore>>,
    device: Option<DeviceState>,
    /// Capability flag handed to every gallery mutation
    unlocked: bool,
    /// Date/caption being edited in the detail view
    draft: MemoryEdit,
    upload_open: bool,
    passcode: String,
    passcode_error: bool,
    uploading: bool,
    /// Downloaded remote photos
    pictures: HashMap<ItemId, Picture>,
    music: MusicPlayer,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Initial fetch of remote memories finished
    Loaded(Result<Vec<MemoryRecord>, StoreError>),
    /// A remote photo finished downloading
    PictureLoaded(ItemId, Result<Handle, StoreError>),
    Select(ItemId),
    CloseDetail,
    DateChanged(String),
    CaptionChanged(String),
    Save,
    Delete,
    /// A remote update or delete came back
    Settled(Settled),
    ToggleUpload,
    PasscodeChanged(String),
    Unlock,
    ClearPasscodeError,
    Lock,
    PickPhoto,
    Uploaded(Result<MemoryRecord, UploadError>),
    ToggleMusic,
}

impl MemoryGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::error!("Ignoring config file: {}", e);
            Config::default()
        });

        let device = DeviceState::open_default()
            .or_else(|e| {
                tracing::warn!("Device settings unavailable ({}), unlock will not persist", e);
                DeviceState::in_memory()
            })
            .map_err(|e| tracing::error!("No device settings: {}", e))
            .ok();
        let unlocked = device
            .as_ref()
            .and_then(|d| d.is_unlocked().ok())
            .unwrap_or(false);

        let music = MusicPlayer::open(&config.music_path());
        let mut gallery = Gallery::new(content::seed_memories(&config.assets_dir()));
        let store = SupabaseStore::connect(&config.remote.supabase_url, &config.remote.anon_key)
            .map(Arc::new);

        let task = match &store {
            Some(store) => {
                let store = store.clone();
                Task::perform(
                    async move { store.list_memories().await },
                    Message::Loaded,
                )
            }
            None => {
                gallery.mark_offline(StoreError::NotConfigured);
                Task::none()
            }
        };

        tracing::info!(
            "Memory gallery started with {} bundled memories (unlocked: {})",
            gallery.items().len(),
            unlocked
        );

        (
            MemoryGallery {
                config,
                gallery,
                store,
                device,
                unlocked,
                draft: MemoryEdit::default(),
                upload_open: false,
                passcode: String::new(),
                passcode_error: false,
                uploading: false,
                pictures: HashMap::new(),
                music,
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(result) => {
                if self.gallery.apply_remote(result).is_ok() {
                    return self.fetch_pictures();
                }
                Task::none()
            }
            Message::PictureLoaded(id, result) => {
                let picture = match result {
                    Ok(handle) => Picture::Loaded(handle),
                    Err(e) => {
                        tracing::warn!("Failed to load photo for {}: {}", id, e);
                        Picture::Failed
                    }
                };
                self.pictures.insert(id, picture);
                Task::none()
            }
            Message::Select(id) => {
                self.gallery.select(&id);
                if let Some(item) = self.gallery.selected() {
                    self.draft = MemoryEdit {
                        date: item.date.clone(),
                        caption: item.caption.clone(),
                    };
                }
                Task::none()
            }
            Message::CloseDetail => {
                self.gallery.close();
                Task::none()
            }
            Message::DateChanged(date) => {
                self.draft.date = date;
                Task::none()
            }
            Message::CaptionChanged(caption) => {
                self.draft.caption = caption;
                Task::none()
            }
            Message::Save => {
                let Some(id) = self.gallery.selected().map(|item| item.id.clone()) else {
                    return Task::none();
                };
                let pending = self.gallery.update(&id, self.draft.clone(), self.unlocked);
                self.gallery.close();

                match (pending, &self.store) {
                    (Some(pending), Some(store)) => {
                        let store = store.clone();
                        Task::perform(
                            async move { pending.run(&*store).await },
                            Message::Settled,
                        )
                    }
                    _ => Task::none(),
                }
            }
            Message::Delete => {
                let Some((id, image)) = self
                    .gallery
                    .selected()
                    .map(|item| (item.id.clone(), item.image.clone()))
                else {
                    return Task::none();
                };
                let pending = self
                    .gallery
                    .delete(&id, &image, self.unlocked, confirm_delete);
                if !self.gallery.items().iter().any(|item| item.id == id) {
                    self.pictures.remove(&id);
                }

                match (pending, &self.store) {
                    (Some(pending), Some(store)) => {
                        let store = store.clone();
                        Task::perform(
                            async move { pending.run(&*store).await },
                            Message::Settled,
                        )
                    }
                    _ => Task::none(),
                }
            }
            Message::Settled(settled) => {
                self.gallery.settle(settled);
                if let Some(alert) = self.gallery.take_alert() {
                    show_alert(&alert.to_string());
                }
                Task::none()
            }
            Message::ToggleUpload => {
                self.upload_open = !self.upload_open;
                Task::none()
            }
            Message::PasscodeChanged(passcode) => {
                self.passcode = passcode;
                Task::none()
            }
            Message::Unlock => self.unlock(),
            Message::ClearPasscodeError => {
                self.passcode_error = false;
                Task::none()
            }
            Message::Lock => {
                if let Some(device) = &self.device {
                    if let Err(e) = device.set_unlocked(false) {
                        tracing::error!("Failed to persist lock: {}", e);
                    }
                }
                self.unlocked = false;
                self.upload_open = false;
                Task::none()
            }
            Message::PickPhoto => {
                if !self.unlocked {
                    tracing::debug!("Ignoring photo pick while locked");
                    return Task::none();
                }
                let Some(store) = self.store.clone() else {
                    show_alert("Uploads need a configured remote store.");
                    return Task::none();
                };

                // Show the native file picker dialog
                let Some(path) = FileDialog::new()
                    .set_title("Select Photo")
                    .add_filter("Photos", PHOTO_EXTENSIONS)
                    .pick_file()
                else {
                    return Task::none();
                };

                self.uploading = true;
                let store: Arc<dyn RemoteStore> = store;
                Task::perform(
                    upload::upload_photo(store, path, self.config.encoder),
                    Message::Uploaded,
                )
            }
            Message::Uploaded(result) => {
                self.uploading = false;
                match result {
                    Ok(record) => {
                        self.gallery.on_upload_success(record);
                        self.upload_open = false;
                        self.fetch_pictures()
                    }
                    Err(e) => {
                        tracing::error!("Upload failed: {}", e);
                        show_alert(&format!("Upload failed. {}", e));
                        Task::none()
                    }
                }
            }
            Message::ToggleMusic => {
                self.music.toggle();
                Task::none()
            }
        }
    }

    fn unlock(&mut self) -> Task<Message> {
        let unlocked = match &self.device {
            Some(device) => device
                .try_unlock(&self.passcode, self.config.passcode.as_deref())
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to persist unlock: {}", e);
                    false
                }),
            None => false,
        };

        if unlocked {
            self.unlocked = true;
            self.passcode_error = false;
            self.passcode.clear();
            return Task::none();
        }

        self.passcode_error = true;
        self.passcode.clear();
        Task::perform(tokio::time::sleep(Duration::from_secs(2)), |_| {
            Message::ClearPasscodeError
        })
    }

    /// Start downloads for remote photos that are not loaded yet
    fn fetch_pictures(&self) -> Task<Message> {
        let Some(store) = &self.store else {
            return Task::none();
        };

        let tasks: Vec<Task<Message>> = self
            .gallery
            .items()
            .iter()
            .filter(|item| !self.pictures.contains_key(&item.id))
            .filter_map(|item| match &item.image {
                ImageSource::Url(url) => Some((item.id.clone(), url.clone())),
                ImageSource::Bundled(_) => None,
            })
            .map(|(id, url)| {
                let store = store.clone();
                Task::perform(
                    async move { store.fetch_image(&url).await.map(Handle::from_bytes) },
                    move |result| Message::PictureLoaded(id.clone(), result),
                )
            })
            .collect();

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if let Some(item) = self.gallery.selected() {
            return ui::detail::view(item, &self.draft, &self.pictures, self.unlocked);
        }

        let gallery = ui::gallery::view(GalleryView {
            items: self.gallery.items(),
            pictures: &self.pictures,
            offline: self.gallery.connection_error().is_some(),
            upload: UploadPanel {
                open: self.upload_open,
                unlocked: self.unlocked,
                passcode: &self.passcode,
                passcode_error: self.passcode_error,
                uploading: self.uploading,
            },
        });

        let music = button(if self.music.is_playing() {
            "Pause music"
        } else {
            "Play music"
        })
        .on_press(Message::ToggleMusic)
        .padding(8);

        let page = column![
            row![music],
            ui::sections::hero(&self.config.site),
            ui::sections::story(),
            ui::sections::moments(self.gallery.seed(), &self.pictures),
            gallery,
            ui::sections::ending(),
        ]
        .spacing(60)
        .padding(40)
        .width(Length::Fill)
        .align_x(Alignment::Center);

        container(scrollable(page))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Blocking yes/no prompt shown before a delete
fn confirm_delete(prompt: &str) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Delete memory")
        .set_description(prompt)
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}

fn show_alert(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Memory gallery")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("memory_gallery=info")),
        )
        .init();

    iced::application("Our Memories", MemoryGallery::update, MemoryGallery::view)
        .theme(MemoryGallery::theme)
        .centered()
        .run_with(MemoryGallery::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(unlocked: bool) -> MemoryGallery {
        let config = Config::default();
        MemoryGallery {
            gallery: Gallery::new(content::seed_memories(&config.assets_dir())),
            store: SupabaseStore::connect("https://abc.supabase.co", "key").map(Arc::new),
            device: DeviceState::in_memory().ok(),
            config,
            unlocked,
            draft: MemoryEdit::default(),
            upload_open: true,
            passcode: String::new(),
            passcode_error: false,
            uploading: false,
            pictures: HashMap::new(),
            music: MusicPlayer::new(None),
        }
    }

    #[test]
    fn test_locked_app_ignores_photo_pick() {
        let mut app = app(false);

        let _ = app.update(Message::PickPhoto);

        assert!(!app.uploading);
        assert!(!app.unlocked);
        assert_eq!(app.gallery.items().len(), 5);
    }

    #[test]
    fn test_lock_closes_upload_panel() {
        let mut app = app(true);

        let _ = app.update(Message::Lock);

        assert!(!app.unlocked);
        assert!(!app.upload_open);
        assert_eq!(app.device.as_ref().map(|d| d.is_unlocked().ok()), Some(Some(false)));
    }

    #[test]
    fn test_music_toggle_without_output_stays_off() {
        let mut app = app(false);

        let _ = app.update(Message::ToggleMusic);

        assert!(!app.music.is_playing());
    }
}
