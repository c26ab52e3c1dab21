//! Class name and type descriptor utilities.
//!
//! Class names appear in several shapes in compiled modules:
//! - Internal form: `java/util/ArrayList`
//! - Object descriptor: `Ljava/util/ArrayList;`
//! - Array descriptor: `[Ljava/util/ArrayList;`, `[[I`
//! - Dotted form (markup and reports): `java.util.ArrayList`
//!
//! Resolution always works on the internal form. Reports always use the dotted form.

/// Primitive type descriptors, including `V` for void.
const PRIMITIVE_DESCRIPTORS: [&str; 9] = ["B", "C", "D", "F", "I", "J", "S", "Z", "V"];

/// Extract the class name referenced by a type descriptor or internal name.
///
/// Array dimensions are stripped, object descriptors are unwrapped, and primitive types
/// yield `None` because they never refer to a class.
///
/// # Examples
///
/// ```
/// use modref_types::names::referenced_class;
///
/// assert_eq!(referenced_class("Ljava/lang/String;"), Some("java/lang/String"));
/// assert_eq!(referenced_class("[[Ljava/util/List;"), Some("java/util/List"));
/// assert_eq!(referenced_class("java/lang/Object"), Some("java/lang/Object"));
/// assert_eq!(referenced_class("[I"), None);
/// assert_eq!(referenced_class("J"), None);
/// ```
pub fn referenced_class(descriptor: &str) -> Option<&str> {
    let element = descriptor.trim_start_matches('[');
    if element.is_empty() || PRIMITIVE_DESCRIPTORS.contains(&element) {
        return None;
    }
    if let Some(inner) = element
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
    {
        return (!inner.is_empty()).then_some(inner);
    }
    Some(element)
}

/// Convert an internal class name to the dotted form used in reports.
pub fn to_dotted(name: &str) -> String {
    name.replace('/', ".")
}

/// Convert a dotted class name (as written in markup) to the internal form.
pub fn to_internal(name: &str) -> String {
    name.replace('.', "/")
}

/// Render a member reference as `owner.name(descriptor)` in dotted form.
///
/// ```
/// use modref_types::names::member_signature;
///
/// assert_eq!(
///     member_signature("com/example/Api", "call", "(Ljava/lang/String;)V"),
///     "com.example.Api.call((Ljava.lang.String;)V)"
/// );
/// ```
pub fn member_signature(owner: &str, name: &str, descriptor: &str) -> String {
    to_dotted(&format!("{}.{}({})", owner, name, descriptor))
}
