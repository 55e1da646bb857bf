//! Conversion from `courier_config::Config` to bridge and logging types.

use std::sync::Arc;

use anyhow::{Result, bail};
use courier_bridge::{BridgeBuilder, Dispatcher, InlineDispatcher, MainLoop};
use courier_capabilities::CapabilityProvider;
use courier_config::{
    Config, DISPATCH_INLINE, DISPATCH_MAIN, LOG_TARGET_FILE, LOG_TARGET_STDERR, LOG_TARGET_STDOUT,
};
use courier_telemetry::{FileRotation, LogConfig, LogFormat, LogTarget};

/// Build a [`LogConfig`] from the `[logging]` section.
pub(crate) fn to_log_config(config: &Config) -> Result<LogConfig> {
    let logging = &config.logging;
    let format: LogFormat = logging.format.parse()?;

    let mut log_config = LogConfig::new(&logging.level)
        .with_format(format)
        .with_directives(logging.directives.iter().cloned());

    log_config = match logging.target.as_str() {
        LOG_TARGET_STDERR => log_config.with_target(LogTarget::Stderr),
        LOG_TARGET_STDOUT => log_config.with_target(LogTarget::Stdout),
        LOG_TARGET_FILE => {
            let Some(directory) = &logging.directory else {
                bail!("logging.directory is required for the file target");
            };
            let rotation: FileRotation = logging.rotation.parse()?;
            log_config.with_file_logging(directory, &logging.file_prefix, rotation)
        },
        other => bail!("unknown log target '{other}'"),
    };

    if !logging.ansi {
        log_config = log_config.without_ansi();
    }
    if !logging.timestamps {
        log_config = log_config.without_timestamps();
    }

    Ok(log_config)
}

fn dispatcher_for(
    dispatch: &str,
    main: &Arc<dyn Dispatcher>,
) -> Result<Arc<dyn Dispatcher>> {
    match dispatch {
        DISPATCH_MAIN => Ok(Arc::clone(main)),
        DISPATCH_INLINE => Ok(Arc::new(InlineDispatcher)),
        other => bail!("unknown dispatch mode '{other}'"),
    }
}

/// Configure a bridge builder from the `[notifications]` and `[sms]`
/// sections.
///
/// Both listeners share one [`MainLoop`], returned for the caller to drive.
pub(crate) fn to_bridge_builder(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
) -> Result<(BridgeBuilder, MainLoop)> {
    let (main_loop, dispatcher) = MainLoop::channel();
    let main: Arc<dyn Dispatcher> = Arc::new(dispatcher);

    let builder = BridgeBuilder::new(provider)
        .with_notification_dispatcher(dispatcher_for(&config.notifications.dispatch, &main)?)
        .with_sms_dispatcher(dispatcher_for(&config.sms.dispatch, &main)?)
        .with_default_format(config.sms.default_format.clone())
        .with_sms_permissions(config.sms.permissions.clone())
        .with_request_code(config.sms.request_code)
        .with_prompt_timeout(config.sms.prompt_timeout());

    Ok((builder, main_loop))
}
