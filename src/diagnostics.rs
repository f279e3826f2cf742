//! Crash diagnostics and the device-restart escape hatch.
//!
//! The station has exactly one fatal path: WiFi association exhausting its
//! bounded attempts during boot. Everything else degrades in-cycle. A panic
//! is always a firmware bug — it gets logged and the chip resets.

use log::error;

/// Install a panic hook that logs the reason before the chip resets.
///
/// On ESP-IDF the abort that follows the hook triggers the system reset;
/// on the host the process just dies, which is what a test wants.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };
        error!("PANIC: {}", reason);
    }));
}

/// Full device restart — the response to a fatal boot-time failure.
///
/// Never returns. There is no graceful shutdown path; the loop either runs
/// or the device reboots.
pub fn device_restart() -> ! {
    error!("device restart requested");

    #[cfg(target_os = "espidf")]
    {
        unsafe {
            esp_idf_svc::sys::esp_restart();
        }
        // esp_restart never returns; satisfy the type checker.
        unreachable!("esp_restart returned");
    }

    #[cfg(not(target_os = "espidf"))]
    {
        std::process::exit(1);
    }
}
