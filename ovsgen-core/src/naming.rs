//! Identifier normalization for generated type and field names.

/// Initialisms that show up in OVSDB schemas (Open_vSwitch, OVN NB/SB).
///
/// Words matching one of these entries, or its plural with a trailing `s`,
/// are rendered fully upper-cased instead of title-cased.
pub const OVSDB_INITIALISMS: &[&str] = &[
    "ACL", "BFD", "CFM", "CT", "CVLAN", "DNS", "DSCP", "ID", "IP", "IPFIX", "LACP", "LLDP", "MAC",
    "MTU", "OVS", "QOS", "RSTP", "SSL", "STP", "TCP", "SCTP", "UDP", "UUID", "VLAN", "STT", "DNAT",
    "SNAT", "ICMP", "SLB",
];

/// Naming rules for turning schema identifiers into target identifiers.
///
/// The initialism table is fixed at construction and never mutated, so a
/// normalizer is freely shareable and every method is a pure function.
///
/// # Example
///
/// ```
/// use ovsgen_core::OVSDB_NAMING;
///
/// assert_eq!(OVSDB_NAMING.normalize("dnat_and_snat"), "DNATAndSNAT");
/// assert_eq!(OVSDB_NAMING.type_name("Logical_Switch"), "LogicalSwitch");
/// assert_eq!(OVSDB_NAMING.enum_alias("qos", "type"), "QosType");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NameNormalizer {
    initialisms: &'static [&'static str],
}

/// Normalizer using [`OVSDB_INITIALISMS`].
pub const OVSDB_NAMING: NameNormalizer = NameNormalizer::new(OVSDB_INITIALISMS);

impl NameNormalizer {
    /// Create a normalizer over the given upper-case initialism table.
    pub const fn new(initialisms: &'static [&'static str]) -> Self {
        Self { initialisms }
    }

    /// Check if an upper-cased word is a known initialism.
    pub fn is_initialism(&self, upper: &str) -> bool {
        self.initialisms.contains(&upper)
    }

    /// Normalize a `_`/`-` separated identifier (e.g., "ip_addresses" -> "IPAddresses").
    ///
    /// Empty input, or input made only of separators, yields an empty string.
    pub fn normalize(&self, ident: &str) -> String {
        let lower = ident.to_lowercase();
        lower
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| self.normalize_word(word))
            .collect()
    }

    /// Normalize a single lower-case word.
    fn normalize_word(&self, word: &str) -> String {
        let upper = word.to_uppercase();
        if self.is_initialism(&upper) {
            return upper;
        }

        if let Some(singular) = word.strip_suffix('s') {
            let upper = singular.to_uppercase();
            if self.is_initialism(&upper) {
                return format!("{}s", upper);
            }
        }

        title_case(word)
    }

    /// Type name for a table (e.g., "Logical_Switch" -> "LogicalSwitch").
    ///
    /// Underscores are stripped and only the first character is upper-cased;
    /// initialisms are deliberately not expanded here.
    pub fn type_name(&self, table: &str) -> String {
        let stripped = table.replace('_', "");
        let mut chars = stripped.chars();
        match chars.next() {
            None => String::new(),
            Some(c) => c.to_uppercase().chain(chars).collect(),
        }
    }

    /// Alias name for an enum column (table type name + normalized column).
    pub fn enum_alias(&self, table: &str, column: &str) -> String {
        format!("{}{}", self.type_name(table), self.normalize(column))
    }

    /// Output file name for a table (e.g., "Logical_Switch", "go" -> "logical_switch.go").
    pub fn file_name(&self, table: &str, extension: &str) -> String {
        format!("{}.{}", table.to_lowercase(), extension)
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        OVSDB_NAMING
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}
