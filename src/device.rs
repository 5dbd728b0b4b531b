use crate::notifier::Notifier;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// Configuration state reported by the device side.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Unconfigured,
    Configured,
    Provisioning,
    /// Any state this UI does not recognize. The page controller leaves the
    /// page untouched for these.
    #[default]
    #[serde(other)]
    Unknown,
}

impl From<&str> for DeviceState {
    fn from(value: &str) -> Self {
        // Single source of truth for state names is the serde mapping above.
        serde_json::from_value(serde_json::Value::String(value.to_string()))
            .unwrap_or(DeviceState::Unknown)
    }
}

/// State report pushed in by the device side of the provisioning flow.
#[derive(Debug, Deserialize)]
pub struct StatusReport {
    pub state: DeviceState,
    /// Network the device was provisioned into, when known.
    pub ssid: Option<String>,
}

/// The device as the page sees it: a configuration state and a change
/// signal.
///
/// State is driven entirely from outside via [`report_state`] or
/// [`apply_report`]; the device never changes state on its own. A destroyed
/// device ignores further reports.
///
/// [`report_state`]: ProvisioningDevice::report_state
/// [`apply_report`]: ProvisioningDevice::apply_report
pub struct ProvisioningDevice {
    state: RefCell<DeviceState>,
    ssid: RefCell<Option<String>>,
    destroyed: Cell<bool>,
    changed_state: Notifier<ProvisioningDevice, DeviceState>,
}

impl ProvisioningDevice {
    pub fn init() -> Rc<Self> {
        Rc::new_cyclic(|me| ProvisioningDevice {
            state: RefCell::new(DeviceState::Unknown),
            ssid: RefCell::new(None),
            destroyed: Cell::new(false),
            changed_state: Notifier::bound_to(me.clone()),
        })
    }

    pub fn changed_state(&self) -> &Notifier<Self, DeviceState> {
        &self.changed_state
    }

    pub fn state(&self) -> DeviceState {
        self.state.borrow().clone()
    }

    pub fn ssid(&self) -> Option<String> {
        self.ssid.borrow().clone()
    }

    pub fn apply_report(&self, report: &StatusReport) {
        if let Some(ssid) = &report.ssid {
            *self.ssid.borrow_mut() = Some(ssid.clone());
        }

        self.report_state(report.state.clone());
    }

    /// Record an externally reported state. Notifies the change listeners
    /// only when the state actually changed.
    pub fn report_state(&self, state: DeviceState) {
        if self.destroyed.get() {
            debug!("ignoring state report for a destroyed device");
            return;
        }

        let previous = self.state.borrow().clone();
        if previous == state {
            return;
        }

        *self.state.borrow_mut() = state.clone();
        debug!("device state: {previous:?} -> {state:?}");
        self.changed_state.notify(&state);
    }

    /// Take the device out of service. Reports arriving afterwards are
    /// dropped.
    pub fn destroy(&self) {
        debug!("device discarded");
        self.destroyed.set(true);
    }
}
