use anyhow::Result;
use env_logger::{Builder, Env, Target};
use log::{error, info};
use prov_ui::{
    config::PageConfig,
    controller::PageController,
    device::{DeviceState, ProvisioningDevice, StatusReport},
    view::{FlowView, PageView, ProvFlow},
};
use std::io::{BufRead, Write};

/// Page surface rendered to the terminal, standing in for the real page.
struct ConsolePageView {
    title: String,
}

impl PageView for ConsolePageView {
    fn rebuild(&self) {
        info!("== {} ==", self.title);
        info!("page cleared, no action available yet");
    }

    fn set_button_label(&self, label: &str) {
        info!("button: [{label}]");
    }

    fn show_flow(&self, flow: ProvFlow) -> Box<dyn FlowView> {
        info!("opening {} view", flow.button_label());
        Box::new(ConsoleFlowView { flow })
    }
}

struct ConsoleFlowView {
    flow: ProvFlow,
}

impl FlowView for ConsoleFlowView {
    fn hide(&self) {
        info!("hiding {} view", self.flow.button_label());
    }
}

fn print_status(controller: &PageController) {
    let Some(device) = controller.device() else {
        return;
    };

    info!("device state: {:?}", device.state());
    if let Some(ssid) = device.ssid() {
        info!("network: {ssid}");
    }
    match controller.bound_flow() {
        Some(flow) => info!("button: [{}]", flow.button_label()),
        None => info!("button hidden"),
    }
}

fn main() -> Result<()> {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    info!("prov-ui simulator version: {}", env!("CARGO_PKG_VERSION"));

    let config = PageConfig::get();
    let view = ConsolePageView {
        title: config.title.clone(),
    };
    let controller = PageController::new(Box::new(view), ProvisioningDevice::init);

    if config.initial_state != DeviceState::Unknown {
        if let Some(device) = controller.device() {
            device.report_state(config.initial_state.clone());
        }
    }

    // The real page reacts to state the device pushes in; here stdin plays
    // the device side: bare words are state names, "report" takes the JSON
    // form a device service would send.
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => {}
            "press" => controller.press_button(),
            "home" => controller.go_home(),
            "status" => print_status(&controller),
            "quit" | "exit" => break,
            _ => {
                if let Some(json) = line.strip_prefix("report ") {
                    match serde_json::from_str::<StatusReport>(json) {
                        Ok(report) => {
                            if let Some(device) = controller.device() {
                                device.apply_report(&report);
                            }
                        }
                        Err(e) => error!("invalid status report: {e}"),
                    }
                } else if let Some(device) = controller.device() {
                    device.report_state(DeviceState::from(line));
                }
            }
        }
    }

    info!("good bye");

    Ok(())
}
