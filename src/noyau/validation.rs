// src/noyau/validation.rs
//
// Pré-validation structurelle (texte brut)
// ----------------------------------------
// Deux balayages indépendants, lancés même si la grammaire échoue :
// - équilibre des parenthèses (pile d’offsets)
// - opérateur binaire sans opérande droit
//
// NOTE: `1+-2` est accepté (signe après opérateur). `*`/`/` en tête de texte
// ne sont pas vérifiés à gauche : asymétrie voulue, identique au comportement
// de référence.

use super::diagnostic::AstError;
use super::position::Span;

pub const MSG_FERMANTE_ORPHELINE: &str =
    "closing parenthesis without matching opening parenthesis";
pub const MSG_OUVRANTE_NON_FERMEE: &str = "opening parenthesis never closed";
pub const MSG_OPERANDE_MANQUANT: &str = "binary operator with no right-hand operand";

/// Lance les deux pré-validateurs, parenthèses d’abord.
pub fn pre_valider(texte: &str) -> Vec<AstError> {
    let mut erreurs = verifier_parentheses(texte);
    erreurs.extend(verifier_operandes(texte));
    erreurs
}

/// Équilibre des parenthèses.
///
/// Les ouvrantes jamais fermées sont rapportées dans l’ordre de la pile
/// (la plus récente d’abord).
pub fn verifier_parentheses(texte: &str) -> Vec<AstError> {
    let mut erreurs = Vec::new();
    let mut pile: Vec<usize> = Vec::new();

    for (i, c) in texte.char_indices() {
        match c {
            '(' => pile.push(i),
            ')' => {
                if pile.pop().is_none() {
                    erreurs.push(AstError::sur_span(
                        texte,
                        Span::caractere(i, c),
                        MSG_FERMANTE_ORPHELINE,
                    ));
                }
            }
            _ => {}
        }
    }

    while let Some(i) = pile.pop() {
        erreurs.push(AstError::sur_span(
            texte,
            Span::caractere(i, '('),
            MSG_OUVRANTE_NON_FERMEE,
        ));
    }

    erreurs
}

/// Opérateurs binaires sans opérande droit (`1+`, `1+*2`, `(1-)`).
pub fn verifier_operandes(texte: &str) -> Vec<AstError> {
    let chars: Vec<(usize, char)> = texte.char_indices().collect();
    let mut erreurs = Vec::new();

    for (k, &(i, c)) in chars.iter().enumerate() {
        if !est_operateur_binaire(c) {
            continue;
        }

        // à gauche : sinon l’opérateur est en tête (signe), rien à dire ici
        let Some(avant) = precedent_non_blanc(&chars[..k]) else {
            continue;
        };
        if !est_fin_operande(avant) {
            continue;
        }

        let manque = match suivant_non_blanc(&chars[k + 1..]) {
            None => true,
            Some(apres) => matches!(apres, ')' | '*' | '/'),
        };
        if manque {
            erreurs.push(AstError::sur_span(
                texte,
                Span::caractere(i, c),
                format!("{MSG_OPERANDE_MANQUANT}: {c}"),
            ));
        }
    }

    erreurs
}

fn est_operateur_binaire(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

fn est_fin_operande(c: char) -> bool {
    c.is_ascii_digit() || c.is_alphabetic() || c == '.' || c == ')'
}

fn precedent_non_blanc(chars: &[(usize, char)]) -> Option<char> {
    chars
        .iter()
        .rev()
        .map(|&(_, c)| c)
        .find(|c| !c.is_whitespace())
}

fn suivant_non_blanc(chars: &[(usize, char)]) -> Option<char> {
    chars.iter().map(|&(_, c)| c).find(|c| !c.is_whitespace())
}
