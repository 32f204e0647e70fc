//! Tests de propriétés (proptest).
//!
//! Invariants qui doivent tenir pour N’IMPORTE QUEL texte :
//!
//! 1. Lignes monotones : offset croissant => position croissante
//! 2. Colonne 0 juste après chaque '\n'
//! 3. Offset au-delà du texte borné à la fin
//! 4. position -> offset -> position est stable
//! 5. Parenthèses équilibrées autour d’un nombre : aucun diagnostic
//! 6. Analyse jamais en panique, valeur absente dès qu’un diagnostic existe

use proptest::prelude::*;

use super::analyse::analyser_texte;
use super::position::{offset_vers_position, position_vers_offset};
use super::validation::verifier_parentheses;

// ---------------------------------------------------------------------------
// Stratégies
// ---------------------------------------------------------------------------

/// Texte libre, multi-lignes, avec quelques caractères multi-octets.
fn arb_texte() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['1', '+', '(', ')', ' ', '\n', 's', 'é', '.', '/']),
        0..60,
    )
    .prop_map(|cs| cs.into_iter().collect())
}

/// Expression bien parenthésée (profondeur bornée).
fn arb_expr() -> impl Strategy<Value = String> {
    let feuille = (0u32..1000).prop_map(|n| n.to_string());
    feuille.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| format!("({e})")),
            (inner.clone(), prop::sample::select(vec!['+', '-', '*']), inner)
                .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
        ]
    })
}

fn frontieres(texte: &str) -> Vec<usize> {
    texte
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(texte.len()))
        .collect()
}

// ---------------------------------------------------------------------------
// Propriétés
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn lignes_monotones(texte in arb_texte()) {
        let bornes = frontieres(&texte);
        for paire in bornes.windows(2) {
            let a = offset_vers_position(&texte, paire[0]);
            let b = offset_vers_position(&texte, paire[1]);
            prop_assert!(a < b, "{a:?} !< {b:?} dans {texte:?}");
            prop_assert!(a.ligne <= b.ligne);
        }
    }

    #[test]
    fn colonne_zero_apres_saut(texte in arb_texte()) {
        for (i, c) in texte.char_indices() {
            if c == '\n' {
                let p = offset_vers_position(&texte, i + 1);
                prop_assert_eq!(p.colonne, 0);
            }
        }
    }

    #[test]
    fn offset_borne(texte in arb_texte(), exces in 0usize..50) {
        let fin = offset_vers_position(&texte, texte.len());
        prop_assert_eq!(offset_vers_position(&texte, texte.len() + exces), fin);
    }

    #[test]
    fn aller_retour(texte in arb_texte()) {
        for offset in frontieres(&texte) {
            let p = offset_vers_position(&texte, offset);
            prop_assert_eq!(position_vers_offset(&texte, p), Some(offset));
        }
    }

    #[test]
    fn parentheses_equilibrees_silencieuses(profondeur in 0usize..30, n in 0u32..1000) {
        let texte = format!("{}{n}{}", "(".repeat(profondeur), ")".repeat(profondeur));
        prop_assert!(verifier_parentheses(&texte).is_empty());
        let r = analyser_texte(&texte);
        prop_assert!(r.erreurs.is_empty());
        prop_assert_eq!(r.valeur, Some(f64::from(n)));
    }

    #[test]
    fn expression_bien_formee_evaluee(texte in arb_expr()) {
        let r = analyser_texte(&texte);
        prop_assert!(r.erreurs.is_empty(), "{texte:?}: {:?}", r.erreurs);
        prop_assert!(r.valeur.is_some());
    }

    #[test]
    fn jamais_de_valeur_avec_diagnostic(texte in arb_texte()) {
        let r = analyser_texte(&texte);
        if !r.erreurs.is_empty() {
            prop_assert!(r.valeur.is_none());
        }
    }
}
