#[cfg(feature = "mock")]
use mockall::automock;

/// Flow a button press can open, mirroring the two entry points of the
/// provisioning wizard.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProvFlow {
    Provisioning,
    ResetToProvisioning,
}

impl ProvFlow {
    pub fn button_label(self) -> &'static str {
        match self {
            ProvFlow::Provisioning => "Provisioning",
            ProvFlow::ResetToProvisioning => "Reset to Provisioning",
        }
    }
}

/// View opened for a running flow, hidden again on "home" navigation.
#[cfg_attr(feature = "mock", automock)]
pub trait FlowView {
    fn hide(&self);
}

/// The page surface the controller drives. Implemented by the host and
/// injected into [`PageController`](crate::controller::PageController).
#[cfg_attr(feature = "mock", automock)]
pub trait PageView {
    /// Clear the page and hide the action button.
    fn rebuild(&self);

    /// Set the action button label and make the button visible.
    fn set_button_label(&self, label: &str);

    /// Open the given flow, returning a handle to hide it again.
    fn show_flow(&self, flow: ProvFlow) -> Box<dyn FlowView>;
}
