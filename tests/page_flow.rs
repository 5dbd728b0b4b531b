use prov_ui::{
    controller::PageController,
    device::{DeviceState, ProvisioningDevice},
    view::{FlowView, PageView, ProvFlow},
};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Debug, Eq, PartialEq)]
enum UiCall {
    Rebuild,
    Label(String),
    ShowFlow(ProvFlow),
    HideFlow(ProvFlow),
}

#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<UiCall>>>,
}

impl Recorder {
    fn calls(&self) -> Vec<UiCall> {
        self.calls.borrow().clone()
    }
}

struct RecordingView {
    recorder: Recorder,
}

impl PageView for RecordingView {
    fn rebuild(&self) {
        self.recorder.calls.borrow_mut().push(UiCall::Rebuild);
    }

    fn set_button_label(&self, label: &str) {
        self.recorder
            .calls
            .borrow_mut()
            .push(UiCall::Label(label.to_string()));
    }

    fn show_flow(&self, flow: ProvFlow) -> Box<dyn FlowView> {
        self.recorder.calls.borrow_mut().push(UiCall::ShowFlow(flow));
        Box::new(RecordingFlowView {
            recorder: self.recorder.clone(),
            flow,
        })
    }
}

struct RecordingFlowView {
    recorder: Recorder,
    flow: ProvFlow,
}

impl FlowView for RecordingFlowView {
    fn hide(&self) {
        self.recorder
            .calls
            .borrow_mut()
            .push(UiCall::HideFlow(self.flow));
    }
}

fn page(recorder: &Recorder) -> PageController {
    PageController::new(
        Box::new(RecordingView {
            recorder: recorder.clone(),
        }),
        ProvisioningDevice::init,
    )
}

#[test]
fn unconfigured_device_offers_provisioning() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let device = controller.device().expect("should have a device");
    device.report_state(DeviceState::Unconfigured);

    assert_eq!(
        recorder.calls(),
        vec![UiCall::Rebuild, UiCall::Label("Provisioning".to_string())]
    );
}

#[test]
fn configured_device_offers_reset_to_provisioning() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let device = controller.device().expect("should have a device");
    device.report_state(DeviceState::Configured);

    assert_eq!(
        recorder.calls(),
        vec![
            UiCall::Rebuild,
            UiCall::Label("Reset to Provisioning".to_string())
        ]
    );
}

#[test]
fn unrecognized_state_leaves_the_page_untouched() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let device = controller.device().expect("should have a device");
    device.report_state(DeviceState::Unconfigured);
    device.report_state(DeviceState::Provisioning);

    // Label is still the one set for the unconfigured state, and so is the
    // bound action.
    assert_eq!(
        recorder.calls(),
        vec![UiCall::Rebuild, UiCall::Label("Provisioning".to_string())]
    );

    controller.press_button();
    assert_eq!(
        recorder.calls().last(),
        Some(&UiCall::ShowFlow(ProvFlow::Provisioning))
    );
}

#[test]
fn press_before_any_state_report_is_a_no_op() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    controller.press_button();

    assert_eq!(recorder.calls(), vec![UiCall::Rebuild]);
}

#[test]
fn button_follows_the_device_back_and_forth() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let device = controller.device().expect("should have a device");
    device.report_state(DeviceState::Unconfigured);
    controller.press_button();
    device.report_state(DeviceState::Configured);
    controller.press_button();

    assert_eq!(
        recorder.calls(),
        vec![
            UiCall::Rebuild,
            UiCall::Label("Provisioning".to_string()),
            UiCall::ShowFlow(ProvFlow::Provisioning),
            UiCall::Label("Reset to Provisioning".to_string()),
            UiCall::ShowFlow(ProvFlow::ResetToProvisioning),
        ]
    );
}

#[test]
fn home_hides_the_flow_discards_the_device_and_rebuilds() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let first_device = controller.device().expect("should have a device");
    first_device.report_state(DeviceState::Unconfigured);
    controller.press_button();
    controller.go_home();

    assert_eq!(
        recorder.calls(),
        vec![
            UiCall::Rebuild,
            UiCall::Label("Provisioning".to_string()),
            UiCall::ShowFlow(ProvFlow::Provisioning),
            UiCall::HideFlow(ProvFlow::Provisioning),
            UiCall::Rebuild,
        ]
    );

    // The discarded device no longer drives the page.
    first_device.report_state(DeviceState::Configured);
    assert_eq!(recorder.calls().len(), 5);

    // The fresh one does.
    let second_device = controller.device().expect("should have a fresh device");
    assert!(!Rc::ptr_eq(&first_device, &second_device));

    second_device.report_state(DeviceState::Configured);
    assert_eq!(
        recorder.calls().last(),
        Some(&UiCall::Label("Reset to Provisioning".to_string()))
    );
}

#[test]
fn home_without_an_open_flow_just_rebuilds() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    controller.go_home();

    assert_eq!(recorder.calls(), vec![UiCall::Rebuild, UiCall::Rebuild]);
}

#[test]
fn home_detaches_the_discarded_device() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let first_device = controller.device().expect("should have a device");
    assert_eq!(first_device.changed_state().listener_count(), 1);

    controller.go_home();

    assert_eq!(first_device.changed_state().listener_count(), 0);
}

#[test]
fn repeated_home_navigation_does_not_accumulate_listeners() {
    let recorder = Recorder::default();
    let controller = page(&recorder);

    let mut discarded = Vec::new();
    for _ in 0..5 {
        discarded.push(controller.device().expect("should have a device"));
        controller.go_home();
    }

    for device in &discarded {
        assert_eq!(device.changed_state().listener_count(), 0);
    }

    let device = controller.device().expect("should have a device");
    assert_eq!(device.changed_state().listener_count(), 1);
}
