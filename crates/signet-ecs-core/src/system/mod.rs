mod manager;
mod system;

pub use system::System;

pub use manager::SystemManager;
