pub mod settings;

pub use settings::{Settings, StoreKind, ENV_PREFIX};
