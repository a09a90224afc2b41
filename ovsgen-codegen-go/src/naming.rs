//! Go-specific naming conventions.

use ovsgen_core::{NameNormalizer, OVSDB_NAMING};
use ovsgen_schema::Atom;

/// Naming rules for generated Go code.
pub const GO_NAMING: NameNormalizer = OVSDB_NAMING;

/// Name of the constant for one enum value (e.g., `QosTypeLinuxHtb`).
///
/// String values are normalized like column names. Other values are spelled
/// out so the result stays a valid Go identifier.
pub fn constant_name(naming: &NameNormalizer, alias: &str, value: &Atom) -> String {
    let mut suffix = match value {
        Atom::String(s) => naming.normalize(s),
        Atom::Integer(n) if *n < 0 => format!("Neg{}", n.unsigned_abs()),
        Atom::Integer(n) => n.to_string(),
        Atom::Real(r) => {
            let text = r.to_string().replace('.', "_");
            match text.strip_prefix('-') {
                Some(rest) => format!("Neg{}", rest),
                None => text,
            }
        }
        Atom::Boolean(true) => "True".to_string(),
        Atom::Boolean(false) => "False".to_string(),
    };
    suffix.retain(|c| c.is_alphanumeric() || c == '_');
    format!("{}{}", alias, suffix)
}
