//! Configuration validator.
//!
//! Runs once before the table initializes and reports the first problem found,
//! in a fixed priority order. Later checks are skipped once one matches.

use crate::config::Config;
use crate::warning::Warning;

/// The host-supplied inputs the validator gates on besides the configuration.
///
/// `entries_to_show` and `active_page` are only checked for presence; the
/// table itself never paginates. A value of `0` counts as not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Page size, as fed to the paginator.
    pub entries_to_show: Option<usize>,
    /// Current page (1-based), as fed to the paginator.
    pub active_page: Option<usize>,
    /// Whether a change sink is registered.
    pub has_change_sink: bool,
    /// Whether row data has been supplied.
    pub has_data: bool,
}

fn present(value: Option<usize>) -> bool {
    matches!(value, Some(n) if n > 0)
}

/// Checks the configuration and inputs, returning the first applicable
/// warning.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::validate::{validate, Inputs};
/// use bubbletea_datatable::{Config, Warning};
///
/// let inputs = Inputs {
///     entries_to_show: Some(10),
///     active_page: Some(1),
///     has_change_sink: false,
///     has_data: true,
/// };
/// assert_eq!(validate(None, &inputs), Err(Warning::ConfigurationMissing));
///
/// let conf = Config::new().with_options(true, false, false, false);
/// assert_eq!(validate(Some(&conf), &inputs), Err(Warning::AllowancesMissing));
///
/// let conf = Config::new().with_headers_from_data(true);
/// assert_eq!(validate(Some(&conf), &inputs), Ok(()));
/// ```
pub fn validate(config: Option<&Config>, inputs: &Inputs) -> Result<(), Warning> {
    let conf = match config {
        Some(conf) if !conf.is_empty() => conf,
        _ => return Err(Warning::ConfigurationMissing),
    };

    if !present(inputs.entries_to_show) {
        return Err(Warning::EntriesToShowMissing);
    }
    if !present(inputs.active_page) {
        return Err(Warning::ActivePageMissing);
    }
    if conf.send_changes() && !inputs.has_change_sink {
        return Err(Warning::UpdateMissing);
    }
    if !inputs.has_data {
        return Err(Warning::DataMissing);
    }
    if conf.display_headers_from_custom_headers() && conf.custom_headers().is_none() {
        return Err(Warning::CustomHeadersMissing);
    }
    if conf.display_headers_from_data() && conf.display_headers_from_custom_headers() {
        return Err(Warning::HeaderModesDouble);
    }
    if conf.allow_options() && !conf.allow_edit() && !conf.allow_delete() && !conf.allow_add() {
        return Err(Warning::AllowancesMissing);
    }
    match conf.casing_flag_count() {
        3 => return Err(Warning::HeaderCaseCollisionAll),
        2 => return Err(Warning::HeaderCaseCollisionTwo),
        _ => {}
    }
    if conf.display_headers_from_custom_headers() {
        if let (Some(order_by), Some(mapping)) = (conf.initial_order_by(), conf.custom_headers()) {
            if !mapping.values().any(|display| display == order_by) {
                return Err(Warning::HeadersMismatch);
            }
        }
    }

    Ok(())
}
