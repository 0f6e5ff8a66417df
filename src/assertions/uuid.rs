//! UUID assertions

use super::context::{Context, Stage};
use uuid::{Uuid, Variant};

/// Assertions on a string node holding a UUID
#[derive(Debug)]
pub struct UuidAssertion<'a>(Option<Stage<'a, Uuid>>);

impl<'a> UuidAssertion<'a> {
    pub(crate) fn new(ctx: Context<'a>, uuid: Uuid) -> Self {
        UuidAssertion(Some(Stage::new(ctx, uuid)))
    }

    pub(crate) fn poisoned() -> Self {
        UuidAssertion(None)
    }

    /// Assert the all-zero UUID
    pub fn nil(self) -> Self {
        if let Some(s) = &self.0 {
            if !s.value.is_nil() {
                s.ctx
                    .fail(format_args!("is nil UUID, actual is \"{}\"", s.value));
            }
        }
        self
    }

    /// Assert any UUID but the all-zero one
    pub fn not_nil(self) -> Self {
        if let Some(s) = &self.0 {
            if s.value.is_nil() {
                s.ctx.fail(format_args!("is not nil UUID"));
            }
        }
        self
    }

    /// Assert the version nibble
    pub fn version(self, version: u8) -> Self {
        if let Some(s) = &self.0 {
            let actual = s.value.get_version_num();
            if actual != usize::from(version) {
                s.ctx.fail(format_args!(
                    "is UUID of version {}, actual is {}",
                    version, actual
                ));
            }
        }
        self
    }

    /// Assert the variant: 0 NCS, 1 RFC 4122, 2 Microsoft, 3 future
    pub fn variant(self, variant: u8) -> Self {
        if let Some(s) = &self.0 {
            let actual = variant_number(s.value.get_variant());
            if actual != variant {
                s.ctx.fail(format_args!(
                    "is UUID of variant {}, actual is {}",
                    variant, actual
                ));
            }
        }
        self
    }

    /// Assert equality with `expected`
    pub fn equal_to(self, expected: Uuid) -> Self {
        if let Some(s) = &self.0 {
            if s.value != expected {
                s.ctx.fail(format_args!(
                    "is UUID equal to \"{}\", actual is \"{}\"",
                    expected, s.value
                ));
            }
        }
        self
    }

    /// Assert inequality with `expected`
    pub fn not_equal_to(self, expected: Uuid) -> Self {
        if let Some(s) = &self.0 {
            if s.value == expected {
                s.ctx
                    .fail(format_args!("is UUID not equal to \"{}\"", expected));
            }
        }
        self
    }

    /// The UUID, nil after a failure
    pub fn value(&self) -> Uuid {
        self.0.as_ref().map_or(Uuid::nil(), |s| s.value)
    }
}

fn variant_number(variant: Variant) -> u8 {
    match variant {
        Variant::NCS => 0,
        Variant::RFC4122 => 1,
        Variant::Microsoft => 2,
        _ => 3,
    }
}
