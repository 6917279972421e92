//! Configuration and input warnings.
//!
//! A table that is misconfigured never renders a partial grid. Instead the
//! validator picks exactly one [`Warning`] and the table shows its title and
//! explanation in place of the data.

use std::fmt;

/// The eleven configuration/input problems, in validation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    /// No configuration, or an empty one.
    ConfigurationMissing,
    /// The page-size input was not supplied.
    EntriesToShowMissing,
    /// The active-page input was not supplied.
    ActivePageMissing,
    /// `sendChanges` is set but no change sink is registered.
    UpdateMissing,
    /// No row data was supplied.
    DataMissing,
    /// Custom header mode without a custom header mapping.
    CustomHeadersMissing,
    /// Both header modes were requested.
    HeaderModesDouble,
    /// Options are enabled, but no individual option is.
    AllowancesMissing,
    /// All three header casing flags are set.
    HeaderCaseCollisionAll,
    /// Two of the header casing flags are set.
    HeaderCaseCollisionTwo,
    /// The initial sort column is not one of the custom header names.
    HeadersMismatch,
}

impl Warning {
    /// Every warning, in the order the validator checks for them.
    pub const ALL: [Warning; 11] = [
        Warning::ConfigurationMissing,
        Warning::EntriesToShowMissing,
        Warning::ActivePageMissing,
        Warning::UpdateMissing,
        Warning::DataMissing,
        Warning::CustomHeadersMissing,
        Warning::HeaderModesDouble,
        Warning::AllowancesMissing,
        Warning::HeaderCaseCollisionAll,
        Warning::HeaderCaseCollisionTwo,
        Warning::HeadersMismatch,
    ];

    /// Stable identifier of the warning.
    pub fn code(&self) -> &'static str {
        match self {
            Warning::ConfigurationMissing => "configuration-missing",
            Warning::EntriesToShowMissing => "entriestoshow-missing",
            Warning::ActivePageMissing => "activepage-missing",
            Warning::UpdateMissing => "update-missing",
            Warning::DataMissing => "data-missing",
            Warning::CustomHeadersMissing => "header-dataHeaders-missing",
            Warning::HeaderModesDouble => "header-dataHeaders-double",
            Warning::AllowancesMissing => "allowances-missing",
            Warning::HeaderCaseCollisionAll => "headers-collision-1",
            Warning::HeaderCaseCollisionTwo => "headers-collision-2",
            Warning::HeadersMismatch => "headers-mismatch",
        }
    }

    /// Looks a warning up by its identifier.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.code() == code)
    }

    /// Short heading shown above the explanation.
    pub fn title(&self) -> &'static str {
        match self {
            Warning::ConfigurationMissing => "CONFIGURATION MISSING",
            Warning::EntriesToShowMissing | Warning::ActivePageMissing | Warning::DataMissing => {
                "DATA MISSING"
            }
            Warning::UpdateMissing => "DATA UPDATE ISSUE",
            Warning::CustomHeadersMissing => "HEADERS MISSING",
            Warning::HeaderModesDouble => "HEADERS COLLISION",
            Warning::AllowancesMissing => "OPTIONS MISSING",
            Warning::HeaderCaseCollisionAll | Warning::HeaderCaseCollisionTwo => {
                "HEADERS STYLES COLLISION"
            }
            Warning::HeadersMismatch => "HEADERS MISMATCH",
        }
    }

    /// Full explanation of what is wrong and how to fix it.
    pub fn explanation(&self) -> &'static str {
        match self {
            Warning::ConfigurationMissing => {
                "You did not provide configuration for the MMTable. Please check the documentation."
            }
            Warning::EntriesToShowMissing => {
                "You didn't provide (number of) entriesToShow to the table. Please pass some value to [entriesToShow] input."
            }
            Warning::ActivePageMissing => {
                "You didn't provide activePage (as number) to the table. Please pass some value to [activePage] input."
            }
            Warning::UpdateMissing => {
                "You set 'sendChanges' in configuration to emit data changes from MMTabler to parent, but you didn't pass 'sendChangesToParent' value/method to MMTabler. Please check the documentation."
            }
            Warning::DataMissing => {
                "You didn't provide any data for the table content. Please pass some data to [data] input."
            }
            Warning::CustomHeadersMissing => {
                "Your setting in configuration sets 'displayHeadersFromDataHeaders' to 'true', but you haven't supplied 'customHeaders' to take headers from!"
            }
            Warning::HeaderModesDouble => {
                "Your setting in configuration sets both 'displayHeadersFromData' and 'displayHeadersFromCustomHeaders' to 'true', but you can only have one of those options set to 'true'."
            }
            Warning::AllowancesMissing => {
                "Your setting in configuration sets 'allowOptions' to 'true', but you haven't supplied any particular option as 'true' (allowEdit, allowDelete or allowAdd)."
            }
            Warning::HeaderCaseCollisionAll => {
                "Your setting in configuration sets 'headersToUppercase', 'headersToCapitalized' and 'headersToLowercase' to 'true', but you can have only one of those set to 'true'."
            }
            Warning::HeaderCaseCollisionTwo => {
                "Your setting in configuration sets two of these options to 'true': 'headersToUppercase', 'headersToCapitalized' or 'headersToLowercase', but you can have only one of those set to 'true'."
            }
            Warning::HeadersMismatch => {
                "Your setting in configuration sets 'displayHeadersFromCustomHeaders' to 'true', but the value you passed for 'initialOrderBy' is not included in your 'customHeaders'. Check the values for typos."
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.explanation())
    }
}

impl std::error::Error for Warning {}
