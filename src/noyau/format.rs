// src/noyau/format.rs
//
// Rendus texte (panneaux de l’interface, traces) :
// - valeur f64 (forme la plus courte qui se relit à l’identique)
// - AST en notation préfixe : (+ 1 (* 2 3))
// - liste de diagnostics, un par ligne

use super::diagnostic::AstError;
use super::expr::Expr;

/// `7`, `0.5`, `-2.25`, `NaN`, `inf`.
pub fn format_valeur(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }
    // Display de f64 : plus courte forme relisible, sans ".0" pour les entiers
    let s = format!("{v}");
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// AST en notation préfixe parenthésée ; les littéraux sont repris du texte.
pub fn format_ast(expr: &Expr, texte: &str) -> String {
    let mut out = String::new();
    ecrire_ast(expr, texte, &mut out);
    out
}

fn ecrire_ast(expr: &Expr, texte: &str, out: &mut String) {
    match expr {
        Expr::Nombre(span) => out.push_str(span.extrait(texte)),

        Expr::Unaire { op, operande, .. } => {
            out.push('(');
            out.push_str(op.symbole());
            out.push(' ');
            ecrire_ast(operande, texte, out);
            out.push(')');
        }

        Expr::Binaire {
            op, gauche, droite, ..
        } => {
            out.push('(');
            out.push_str(op.symbole());
            out.push(' ');
            ecrire_ast(gauche, texte, out);
            out.push(' ');
            ecrire_ast(droite, texte, out);
            out.push(')');
        }

        Expr::Appel { nom, argument, .. } => {
            out.push('(');
            out.push_str(nom);
            out.push(' ');
            ecrire_ast(argument, texte, out);
            out.push(')');
        }
    }
}

/// Une ligne par diagnostic (`ligne:col-ligne:col message`, 1-based).
pub fn format_diagnostics(erreurs: &[AstError]) -> String {
    erreurs
        .iter()
        .map(AstError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
