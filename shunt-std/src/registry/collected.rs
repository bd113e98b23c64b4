//! Converters collected through `inventory`.

use shunt_core::{ConverterRef, TypeTag};

/// A converter submitted with `inventory::submit!`.
///
/// ```rust,ignore
/// inventory::submit! {
///     ConverterRegistration::new(TypeTag::TEXT, MONEY, money_to_text)
/// }
/// ```
pub struct ConverterRegistration {
    /// The type the converter produces.
    pub target: TypeTag,
    /// The type the converter accepts.
    pub source: TypeTag,
    /// Creates the converter when a registry is built.
    pub create: fn() -> ConverterRef,
}

impl ConverterRegistration {
    /// Describe a registration.
    pub const fn new(target: TypeTag, source: TypeTag, create: fn() -> ConverterRef) -> Self {
        Self {
            target,
            source,
            create,
        }
    }
}

inventory::collect!(ConverterRegistration);

pub(super) fn registrations() -> impl Iterator<Item = &'static ConverterRegistration> {
    inventory::iter::<ConverterRegistration>.into_iter()
}
