//! Tests de bout en bout : texte -> parse -> analyse.
//!
//! Chaque scénario vérifie les diagnostics (messages + positions) et la règle
//! de suppression : un seul diagnostic suffit à retirer la valeur.

use super::analyse::{analyser, analyser_texte, ResultatAnalyse};
use super::eval::{MSG_DIVISION_PAR_ZERO, MSG_NOMBRE_ILLISIBLE};
use super::fonctions::{MSG_LOG_NON_POSITIF, MSG_RACINE_NEGATIVE};
use super::grammaire::parse;
use super::position::Position;
use super::validation::{MSG_FERMANTE_ORPHELINE, MSG_OPERANDE_MANQUANT, MSG_OUVRANTE_NON_FERMEE};

fn valeur_ok(texte: &str) -> f64 {
    let r = analyser_texte(texte);
    assert!(r.erreurs.is_empty(), "texte={texte:?} erreurs={:?}", r.erreurs);
    r.valeur
        .unwrap_or_else(|| panic!("valeur absente pour {texte:?}"))
}

fn seul_message(texte: &str) -> String {
    let r = analyser_texte(texte);
    assert!(r.valeur.is_none(), "valeur présente pour {texte:?}");
    assert_eq!(r.erreurs.len(), 1, "texte={texte:?} erreurs={:?}", r.erreurs);
    r.erreurs[0].message.clone()
}

fn assert_suppression(r: &ResultatAnalyse) {
    if !r.erreurs.is_empty() {
        assert!(r.valeur.is_none(), "valeur malgré erreurs: {r:?}");
    }
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn precedence() {
    assert_eq!(valeur_ok("1+2*3"), 7.0);
    assert_eq!(valeur_ok("2*3+1"), 7.0);
    assert_eq!(valeur_ok("2*(3+1)"), 8.0);
}

#[test]
fn blancs_et_lignes() {
    assert_eq!(valeur_ok("  1 +\n  2 \n"), 3.0);
}

#[test]
fn signes_enchaines() {
    assert_eq!(valeur_ok("--2"), 2.0);
    assert_eq!(valeur_ok("1 - -2"), 3.0);
    assert_eq!(valeur_ok("-(1+2)"), -3.0);
    assert_eq!(valeur_ok("(-1+3)"), 2.0);
}

#[test]
fn fonctions_composees() {
    let v = valeur_ok("sqrt(sin(0)+cos(0)+3)");
    assert_eq!(v, 2.0);
    let v = valeur_ok("log(1)*10");
    assert_eq!(v, 0.0);
}

#[test]
fn decimales() {
    assert_eq!(valeur_ok(".5+1."), 1.5);
}

/* ------------------------ Structure ------------------------ */

#[test]
fn parenthese_non_fermee_a_son_offset() {
    let r = analyser_texte("2*(1+2");
    assert_eq!(r.erreurs.len(), 1);
    assert_eq!(r.erreurs[0].message, MSG_OUVRANTE_NON_FERMEE);
    assert_eq!(r.erreurs[0].plage.debut, Position::new(0, 2));
    assert!(r.valeur.is_none());
}

#[test]
fn fermante_orpheline_en_tete() {
    let r = analyser_texte(")1");
    assert_eq!(r.erreurs.len(), 1);
    assert_eq!(r.erreurs[0].message, MSG_FERMANTE_ORPHELINE);
    assert_eq!(r.erreurs[0].plage.debut, Position::new(0, 0));
}

#[test]
fn operande_manquant() {
    assert!(seul_message("1+").starts_with(MSG_OPERANDE_MANQUANT));
    assert!(seul_message("1+*2").starts_with(MSG_OPERANDE_MANQUANT));
    // signe après opérateur : accepté, et même évaluable
    assert_eq!(valeur_ok("1+-2"), -1.0);
}

/* ------------------------ Domaine ------------------------ */

#[test]
fn division_par_zero() {
    assert!(seul_message("10/0").contains(MSG_DIVISION_PAR_ZERO));
}

#[test]
fn racine_negative() {
    assert_eq!(seul_message("sqrt(-1)"), MSG_RACINE_NEGATIVE);
}

#[test]
fn log_non_positif() {
    assert_eq!(seul_message("log(0)"), MSG_LOG_NON_POSITIF);
    assert_eq!(seul_message("log(-3)"), MSG_LOG_NON_POSITIF);
}

#[test]
fn nan_et_infini_hors_gardes() {
    // 400 chiffres : +inf en f64, donc g - g vaut NaN
    let g = "9".repeat(400);
    for f in ["sqrt", "log"] {
        let r = analyser_texte(&format!("{f}({g} - {g})"));
        assert!(r.erreurs.is_empty(), "{f}: {:?}", r.erreurs);
        assert!(r.valeur.is_some_and(f64::is_nan));

        let r = analyser_texte(&format!("{f}({g})"));
        assert!(r.erreurs.is_empty(), "{f}: {:?}", r.erreurs);
        assert_eq!(r.valeur, Some(f64::INFINITY));
    }
}

#[test]
fn nombre_illisible() {
    assert_eq!(seul_message("1..2"), MSG_NOMBRE_ILLISIBLE);
}

#[test]
fn fonction_inconnue() {
    assert_eq!(seul_message("exp(1)"), "unknown function: exp");
}

#[test]
fn suppression_meme_si_calculable_ailleurs() {
    // (1+2) est calculable, mais 1/0 suffit à retirer toute valeur
    let r = analyser_texte("(1+2) + 1/0");
    assert_eq!(r.erreurs.len(), 1);
    assert!(r.valeur.is_none());
    assert!(r.ast.is_some());
    assert_suppression(&r);
}

#[test]
fn ligne_colonne_sur_plusieurs_lignes() {
    let r = analyser_texte("1 +\n 2 / 0");
    assert_eq!(r.erreurs.len(), 1);
    assert_eq!(r.erreurs[0].plage.debut, Position::new(1, 3));
    assert_eq!(r.erreurs[0].plage.fin, Position::new(1, 4));
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn deux_analyses_identiques() {
    for texte in ["1+2*3", "(1+2", "10/0", "sqrt(-1)+log(0)", "", "1 +", "foo(2)"] {
        let p = parse(texte);
        let a = analyser(texte, &p);
        let b = analyser(texte, &p);
        assert_eq!(a, b, "texte={texte:?}");
        assert_suppression(&a);
    }
}
