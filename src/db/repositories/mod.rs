pub mod cameras;
pub mod events;
pub mod layouts;
pub mod recordings;
pub mod settings;
pub mod users;

pub use cameras::CamerasRepository;
pub use events::EventsRepository;
pub use layouts::LayoutsRepository;
pub use recordings::RecordingsRepository;
pub use settings::SettingsRepository;
pub use users::UsersRepository;
