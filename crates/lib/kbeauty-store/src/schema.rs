pub const TABLE_BRAND: &str = "brand";
pub const TABLE_INGREDIENT: &str = "ingredient";
pub const TABLE_ROUTINE: &str = "routine";
pub const TABLE_CONCERN: &str = "concern";

/// Routine served when a requested routine type is not in the catalog.
pub const DEFAULT_ROUTINE: &str = "basic_korean";

pub const PRODUCT_TYPE_SERUM: &str = "serum";
pub const PRODUCT_TYPE_MOISTURIZER: &str = "moisturizer";
pub const PRODUCT_TYPE_ESSENCE: &str = "essence";
pub const PRODUCT_TYPE_TONER: &str = "toner";
pub const PRODUCT_TYPE_CLEANSER: &str = "cleanser";
pub const PRODUCT_TYPE_SUNSCREEN: &str = "sunscreen";
pub const PRODUCT_TYPE_EYE_CREAM: &str = "eye_cream";
pub const PRODUCT_TYPE_SLEEPING_MASK: &str = "sleeping_mask";
pub const PRODUCT_TYPE_LIP_CARE: &str = "lip_care";
