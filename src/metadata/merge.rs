//! Two-tier merge of class-level defaults with method-level declarations.

use super::types::Declarations;

impl Declarations {
    /// Layer `delta` over `self`, field by field.
    ///
    /// Keys present only in the base are kept, keys present only in the delta
    /// are added, and on a shared key the delta's entry replaces the base's.
    /// The result is keyed, so option names and argument positions stay unique.
    pub fn overlay(&self, delta: &Declarations) -> Declarations {
        let mut merged = self.clone();
        merged.options.extend(
            delta
                .options
                .iter()
                .map(|(name, spec)| (name.clone(), spec.clone())),
        );
        merged.argv.extend(
            delta
                .argv
                .iter()
                .map(|(position, notes)| (*position, notes.clone())),
        );
        merged
    }
}
