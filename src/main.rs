use cosmic::app::Settings;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::iced::Limits;

mod application;
mod components;
mod message;
mod pages;

use daybook::api;
use daybook::config;
use daybook::core;
use daybook::store;
use daybook::view;

use application::{Daybook, Flags};
use config::{CONFIG_VERSION, DaybookConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cosmic_cfg = cosmic::cosmic_config::Config::new("dev.daybook.app", CONFIG_VERSION)?;
    let config = DaybookConfig::get_entry(&cosmic_cfg).unwrap_or_else(|(_, cfg)| cfg);

    // Log to the systemd user journal (`journalctl --user -t daybook -f`).
    // Our own targets log at info or debug per config, everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("daybook")
                    || target.starts_with("application")
                    || target.starts_with("pages")
                    || target.starts_with("components")
                {
                    let max = if daybook::debug_logging() {
                        log::LevelFilter::Debug
                    } else {
                        log::LevelFilter::Info
                    };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        let journal = systemd_journal_logger::JournalLog::new()?
            .with_syslog_identifier("daybook".to_string());

        daybook::set_debug_logging(config.debug_logging);

        log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))?;
        // Debug must pass the global gate so the runtime toggle takes effect
        log::set_max_level(log::LevelFilter::Debug);
    }

    let mut settings = Settings::default();
    settings = settings.size_limits(Limits::NONE.min_width(360.0).min_height(480.0));

    let flags = Flags {
        config,
        cosmic_config: cosmic_cfg,
    };
    cosmic::app::run::<Daybook>(settings, flags)?;

    Ok(())
}
