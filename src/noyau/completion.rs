// src/noyau/completion.rs
//
// Complétion : recherche par préfixe dans la table des fonctions.

use super::fonctions::{Fonction, FONCTIONS};
use super::position::{position_vers_offset, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub libelle: &'static str,
    pub detail: &'static str,
    /// Snippet (`$1` = curseur).
    pub insertion: &'static str,
}

impl From<&Fonction> for Suggestion {
    fn from(f: &Fonction) -> Self {
        Self {
            libelle: f.nom,
            detail: f.description,
            insertion: f.insertion,
        }
    }
}

/// Premières lettres distinctes des noms de fonction (ordre de la table).
pub fn caracteres_declencheurs() -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for c in FONCTIONS.iter().filter_map(|f| f.nom.chars().next()) {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Mot courant (lettres ASCII) qui se termine à `offset`.
pub fn mot_courant(texte: &str, offset: usize) -> &str {
    let avant = texte.get(..offset).unwrap_or("");
    let debut = avant
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map_or(avant.len(), |(i, _)| i);
    &avant[debut..]
}

/// Suggestions pour la position du curseur ; vide si la position sort du texte.
pub fn suggerer(texte: &str, position: Position) -> Vec<Suggestion> {
    let Some(offset) = position_vers_offset(texte, position) else {
        return Vec::new();
    };
    suggerer_a_offset(texte, offset)
}

pub fn suggerer_a_offset(texte: &str, offset: usize) -> Vec<Suggestion> {
    let prefixe = mot_courant(texte, offset).to_ascii_lowercase();
    FONCTIONS
        .iter()
        .filter(|f| f.nom.starts_with(&prefixe))
        .map(Suggestion::from)
        .collect()
}
