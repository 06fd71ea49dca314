// condition constants
pub const OPERATOR_SIGIL: char = '$';
pub const OP_LT: &str = "$lt";
pub const OP_LTE: &str = "$lte";
pub const OP_GT: &str = "$gt";
pub const OP_GTE: &str = "$gte";
pub const COMPARISON_OPERATORS: [&str; 4] = [OP_LT, OP_LTE, OP_GT, OP_GTE];

// store constants
pub const JSON_EXTENSION: &str = "json";
pub const TEMP_FILE_SUFFIX: &str = "tmp";
pub const IN_MEMORY_STORE: &str = "<in-memory>";
