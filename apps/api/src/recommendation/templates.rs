// Fixed note templates attached to every recommendation output.
// Placeholders are substituted with `str::replace` before use.

pub const NOTE_NO_MATCH: &str =
    "No treatments matched your stated concerns, goals or areas. \
    A consultation can help identify suitable options.";

pub const NOTE_SAFETY_EXCLUSIONS: &str =
    "Some treatments were excluded because they are not safe with the medical conditions you reported.";

pub const NOTE_RECENCY_DEFERRALS: &str =
    "Some treatments were deferred because you had a related treatment recently. \
    They may become suitable after a recovery interval.";

pub const NOTE_BUDGET_REACHED: &str =
    "Your selection reached the maximum of your budget range. \
    See the upgrade suggestions for what a larger budget would add.";

pub const NOTE_NOTHING_FITS_BUDGET: &str =
    "None of the matching treatments fit within your budget range.";

pub const NOTE_FLEXIBLE_BUDGET: &str =
    "No budget ceiling was applied, so every suitable treatment is included.";

/// Replace `{detail}` before use.
pub const NOTE_OTHER_CONCERN_TEMPLATE: &str =
    "Your additional concern ({detail}) is not covered by our treatment list and will be reviewed during consultation.";

pub const NOTE_OTHER_CONCERN_GENERIC: &str =
    "Your additional concern is not covered by our treatment list and will be reviewed during consultation.";

/// Replace `{extra}` and `{remaining}` before use.
pub const BUDGET_EXCLUSION_DETAIL_TEMPLATE: &str =
    "Needs {extra} KRW more than the {remaining} KRW left in your budget";
