/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Holder used when a caller does not name one
pub const DEFAULT_OWNER: &str = "John Doe";

/// `type_specific_fields` key holding the day of month of a flow
pub const FLOW_DAY_FIELD: &str = "day";

/// `type_specific_fields` key holding the amount credited on each flow occurrence
pub const FLOW_AMOUNT_FIELD: &str = "amount";
