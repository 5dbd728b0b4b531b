use crate::{
    device::{DeviceState, ProvisioningDevice},
    notifier::Subscription,
    view::{FlowView, PageView, ProvFlow},
};
use log::{debug, info};
use std::{cell::RefCell, rc::Rc};

type DeviceFactory = Box<dyn Fn() -> Rc<ProvisioningDevice>>;

/// Drives the provisioning page: one device instance, one button, at most
/// one open flow at a time, all owned here instead of living in page-scope
/// globals.
///
/// The state mapping is fixed: an unconfigured device offers the
/// provisioning flow, a configured one the reset-to-provisioning flow. Every
/// other reported state deliberately leaves the button exactly as last set.
pub struct PageController {
    inner: Rc<Inner>,
    device_factory: DeviceFactory,
}

struct Inner {
    view: Box<dyn PageView>,
    session: RefCell<Option<Session>>,
}

/// Everything tied to the lifetime of one device instance, replaced
/// wholesale on "home" navigation.
struct Session {
    device: Rc<ProvisioningDevice>,
    subscription: Subscription,
    bound_flow: Option<ProvFlow>,
    flow_view: Option<Box<dyn FlowView>>,
}

impl PageController {
    /// Build the page and bring up a first device instance from the factory.
    pub fn new(
        view: Box<dyn PageView>,
        device_factory: impl Fn() -> Rc<ProvisioningDevice> + 'static,
    ) -> Self {
        let controller = PageController {
            inner: Rc::new(Inner {
                view,
                session: RefCell::new(None),
            }),
            device_factory: Box::new(device_factory),
        };
        controller.show();
        controller
    }

    /// Current device instance, for feeding externally driven state reports.
    pub fn device(&self) -> Option<Rc<ProvisioningDevice>> {
        self.inner
            .session
            .borrow()
            .as_ref()
            .map(|session| Rc::clone(&session.device))
    }

    /// Flow currently bound to the button, once a recognized state arrived.
    pub fn bound_flow(&self) -> Option<ProvFlow> {
        self.inner
            .session
            .borrow()
            .as_ref()
            .and_then(|session| session.bound_flow)
    }

    /// The button click: open whichever flow the last recognized state bound.
    pub fn press_button(&self) {
        let flow = match self.bound_flow() {
            Some(flow) => flow,
            None => {
                debug!("button press with no action bound");
                return;
            }
        };

        let flow_view = self.inner.view.show_flow(flow);
        if let Some(session) = self.inner.session.borrow_mut().as_mut() {
            session.flow_view = Some(flow_view);
        }
    }

    /// "Home" navigation: hide the open flow, discard the device and rebuild
    /// the page around a fresh one.
    pub fn go_home(&self) {
        if let Some(mut session) = self.inner.session.borrow_mut().take() {
            if let Some(flow_view) = session.flow_view.take() {
                flow_view.hide();
            }
            session.device.changed_state().detach(session.subscription);
            session.device.destroy();
        }

        self.show();
    }

    fn show(&self) {
        self.inner.view.rebuild();

        let device = (self.device_factory)();
        let weak = Rc::downgrade(&self.inner);
        let subscription = device.changed_state().attach(move |_, state| {
            if let Some(inner) = weak.upgrade() {
                inner.apply_state(state);
            }
        });

        *self.inner.session.borrow_mut() = Some(Session {
            device,
            subscription,
            bound_flow: None,
            flow_view: None,
        });

        info!("provisioning page shown");
    }
}

impl Inner {
    fn apply_state(&self, state: &DeviceState) {
        let flow = match state {
            DeviceState::Unconfigured => ProvFlow::Provisioning,
            DeviceState::Configured => ProvFlow::ResetToProvisioning,
            other => {
                debug!("no page action for device state {other:?}");
                return;
            }
        };

        self.view.set_button_label(flow.button_label());
        if let Some(session) = self.session.borrow_mut().as_mut() {
            session.bound_flow = Some(flow);
        }
    }
}
