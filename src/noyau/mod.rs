//! Noyau d’analyse des expressions
//!
//! Organisation interne :
//! - position.rs   : offset <-> (ligne, colonne)
//! - diagnostic.rs : AstError (plage + message)
//! - validation.rs : pré-validateurs sur texte brut (parenthèses, opérandes)
//! - arbre.rs      : arbre concret + recherche en profondeur
//! - jetons.rs     : feuilles (nom + nom_locate)
//! - grammaire.rs  : règles -> arbre concret + issue du parse
//! - expr.rs       : AST sémantique (4 formes)
//! - mappage.rs    : arbre concret -> AST
//! - fonctions.rs  : table sin/cos/tan/sqrt/log + gardes de domaine
//! - eval.rs       : évaluation f64 + diagnostics
//! - analyse.rs    : orchestration + coloration préfixe/suffixe
//! - completion.rs : suggestions par préfixe
//! - session.rs    : documents ouverts, diagnostics publiés
//! - format.rs     : rendus texte

pub mod analyse;
pub mod arbre;
pub mod completion;
pub mod diagnostic;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod grammaire;
pub mod jetons;
pub mod mappage;
pub mod position;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests_analyse;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale (interface)
pub use session::Session;
