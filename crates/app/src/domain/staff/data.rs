//! Staff Data

/// New Staff Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaff {
    /// Plaintext name; encrypted before it is stored.
    pub name: String,

    /// Plaintext phone number; encrypted before it is stored.
    pub phone: String,

    pub department: String,
}

/// Staff Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffUpdate {
    pub name: String,
    pub phone: String,
}
