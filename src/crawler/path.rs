//! Import target normalization

use crate::vault::reference;
use crate::vault::Vault;

use super::directive::strip_angle_brackets;

/// Turn a captured import target into a vault reference.
///
/// The target is taken relative to the directory of the importing document
/// and the document extension is appended. The result is always
/// namespace-relative.
pub fn normalize(current_dir: &str, captured_target: &str, extension: &str) -> String {
    let target = strip_angle_brackets(captured_target);

    let joined = if reference::is_root(current_dir) {
        format!("{}.{}", target, extension)
    } else {
        format!("{}/{}.{}", current_dir, target, extension)
    };

    reference::clean(&joined)
}

/// Find the document an import target refers to.
///
/// A target that already names a document relative to the vault root is used
/// as is; anything else goes through `normalize` against the importing
/// document's directory. The returned reference may not exist.
pub fn locate<V: Vault + ?Sized>(
    vault: &V,
    current_document: &str,
    captured_target: &str,
    extension: &str,
) -> String {
    let target = strip_angle_brackets(captured_target);

    let literal = reference::clean(target);
    if !literal.is_empty() && vault.is_document(&literal) {
        return literal;
    }

    normalize(&vault.parent_dir(current_document), target, extension)
}
