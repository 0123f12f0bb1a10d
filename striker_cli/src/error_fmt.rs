//! Human-readable error descriptions and structured JSON error formatting.

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use striker_core::error::{BuildError, StrikerError};

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingRadios => {
                "What happened: No radio set was provided to the control loop.\nLikely causes: The supervisor, team or ball channel failed to initialize or was not wired into the builder.\nHow to fix: Ensure all three channels are created successfully and passed via with_radios(...).".to_string()
            }
            BuildError::MissingSensors => {
                "What happened: No sensor set was provided to the control loop.\nLikely causes: GPS, compass or a sonar failed to initialize or was not wired into the builder.\nHow to fix: Ensure the sensors are created successfully and passed via with_sensors(...).".to_string()
            }
            BuildError::MissingDrivetrain => {
                "What happened: No wheel motors were provided to the control loop.\nLikely causes: A motor device failed to initialize or was not wired into the builder.\nHow to fix: Ensure both wheel motors are created successfully and passed via with_drivetrain(...).".to_string()
            }
            BuildError::MissingIdentity => {
                "What happened: Robot identity not set.\nLikely causes: The CLI did not pass --robot or the builder was not configured.\nHow to fix: Provide a roster name (e.g., `striker run --robot B1`).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun; an empty file reproduces stock match behavior."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<StrikerError>() {
        // Specific domain cases first
        if let StrikerError::MalformedPacket {
            channel,
            expected,
            got,
        } = se
        {
            return format!(
                "What happened: A {channel} packet arrived with {got} bytes (expected {expected}).\nLikely causes: A peer speaking a different wire layout, or a truncated transmission.\nHow to fix: Make sure every robot and the supervisor run the same packet definitions."
            );
        }
        if let StrikerError::Config(msg) = se {
            return format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: A robot name outside the roster, or out-of-range values in the TOML.\nHow to fix: Use a roster name (B1..B3 or Y1..Y3) and check the config file."
            );
        }
        // Fallback to generic for other domain errors
        return format!(
            "What happened: {se}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
        );
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("parse config") {
        return "What happened: The config file is not valid TOML for this schema.\nLikely causes: A typo in a key, a wrong value type, or an unclosed table.\nHow to fix: Fix the reported line; every key is optional, so an empty file is a valid starting point.".to_string();
    }

    if lower.contains("sonar read") || lower.contains("compass read") || lower.contains("gps read")
    {
        return "What happened: A sensor read failed mid-tick.\nLikely causes: A faulted device in the backend, or a mis-wired simulated sensor.\nHow to fix: Check the named sensor's wiring and re-run with --log-level=debug.".to_string();
    }

    if lower.contains("left wheel") || lower.contains("right wheel") {
        return "What happened: A wheel motor rejected a velocity command.\nLikely causes: Motor controller fault or a disconnected drivetrain device.\nHow to fix: Check the drivetrain wiring; the failing side is named in the error.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes by error class: 2 config, 3 hardware, 4 malformed packet.
/// Anything else returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use striker_core::error::{BuildError, StrikerError};

    if let Some(se) = err.downcast_ref::<StrikerError>() {
        return match se {
            StrikerError::MalformedPacket { .. } => 4,
            StrikerError::Hardware(_) | StrikerError::HardwareFault(_) | StrikerError::State(_) => {
                3
            }
            StrikerError::Config(_) => 2,
        };
    }
    if err.downcast_ref::<BuildError>().is_some()
        || err.downcast_ref::<toml::de::Error>().is_some()
    {
        return 2;
    }
    if err.to_string().to_ascii_lowercase().contains("config") {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;
    use striker_core::error::StrikerError;

    if let Some(StrikerError::MalformedPacket {
        channel,
        expected,
        got,
    }) = err.downcast_ref::<StrikerError>()
    {
        return json!({
            "reason": "MalformedPacket",
            "details": { "channel": channel.to_string(), "expected": expected, "got": got },
            "message": humanize(err),
        })
        .to_string();
    }

    json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}

fn reason_name(err: &eyre::Report) -> &'static str {
    use striker_core::error::{BuildError, StrikerError};

    if let Some(se) = err.downcast_ref::<StrikerError>() {
        return match se {
            StrikerError::MalformedPacket { .. } => "MalformedPacket",
            StrikerError::Hardware(_) => "Hardware",
            StrikerError::HardwareFault(_) => "HardwareFault",
            StrikerError::Config(_) => "Config",
            StrikerError::State(_) => "State",
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return "Build";
    }
    "Error"
}
