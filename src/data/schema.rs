/// Column-name constants for the operations sheet.
/// Names are compared after header whitespace has been trimmed.

pub const VNO: &str = "VNO";
pub const MONTH: &str = "Month";
pub const WEEK: &str = "Week";
pub const BRANCH: &str = "Branch";
pub const BILL_AMOUNT: &str = "Bill Amount";
pub const BILL_TYPE: &str = "BILL TYPE";
pub const ACTUAL_WEIGHT: &str = "Act. Weight(Main)";
pub const LOAD_TYPE: &str = "Load Type";
pub const CONSIGNMENT_FREIGHT_AMOUNT: &str = "Consignment Freight Amount";

pub const REQUIRED: [&str; 9] = [
    VNO,
    MONTH,
    WEEK,
    BRANCH,
    BILL_AMOUNT,
    BILL_TYPE,
    ACTUAL_WEIGHT,
    LOAD_TYPE,
    CONSIGNMENT_FREIGHT_AMOUNT,
];

/// Lowercased `BILL TYPE` value counted as freight billing.
pub const FREIGHT_BILL_TYPE: &str = "freight";
