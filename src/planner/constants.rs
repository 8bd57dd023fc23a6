use chrono::Weekday;

/// Servings a recipe's quantities are written for when none is recorded.
pub const DEFAULT_RECIPE_SERVINGS: u32 = 4;

/// Servings given to a meal slot assigned without an explicit count.
pub const DEFAULT_PLAN_SERVINGS: u32 = 4;

/// Decimal places shopping quantities are rounded to.
pub const QUANTITY_DECIMALS: i32 = 2;

/// First day of a planning week.
pub const WEEK_START: Weekday = Weekday::Mon;

/// Jaro-Winkler score above which a typed name is offered as a suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions offered for an unknown name.
pub const MAX_SUGGESTIONS: usize = 5;

/// Round a quantity to `QUANTITY_DECIMALS` places.
pub fn round_quantity(value: f64) -> f64 {
    let scale = 10f64.powi(QUANTITY_DECIMALS);
    (value * scale).round() / scale
}
