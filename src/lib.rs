pub mod config;
pub mod controller;
pub mod device;
pub mod notifier;
pub mod view;

pub use config::PageConfig;
pub use controller::PageController;
pub use device::{DeviceState, ProvisioningDevice, StatusReport};
pub use notifier::{Notifier, Subscription};
pub use view::{FlowView, PageView, ProvFlow};
