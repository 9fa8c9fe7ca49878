/// Uppercase the first character, leaving the rest untouched.
///
/// # Examples
/// ```
/// use typemirror_core::utils::capitalize;
/// assert_eq!(capitalize("meta"), "Meta");
/// assert_eq!(capitalize("MetaData"), "MetaData");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Join a package path and a type name with `.`.
///
/// An empty package yields the bare name.
///
/// # Examples
/// ```
/// use typemirror_core::utils::qualify;
/// assert_eq!(qualify("models", "Person"), "models.Person");
/// assert_eq!(qualify("", "Person"), "Person");
/// ```
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
