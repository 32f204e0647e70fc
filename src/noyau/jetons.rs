// src/noyau/jetons.rs
//
// Jetons (feuilles de l’arbre concret)
// ------------------------------------
// - nombres : lexème [0-9.]+ (validé plus tard par l’évaluateur : "1.2.3" passe ici)
// - opérateurs + - * /
// - parenthèses ( )
// - noms de fonction [A-Za-z]+ (tout nom est accepté ici, l’évaluateur tranche)
//
// Chaque jeton saute les blancs AVANT lui ; le span du noeud exclut ces blancs.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, multispace0},
    error::{context, VerboseError},
    IResult,
};
use nom_locate::LocatedSpan;

use super::arbre::{Noeud, Regle};
use super::position::Span;

/// Données portées par l’entrée (champ `extra`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contexte<'a> {
    /// Texte source complet.
    pub source: &'a str,
    /// Facteurs ouverts au-dessus de la position courante.
    pub profondeur: usize,
}

/// Entrée du moteur : texte restant + contexte.
pub type Entree<'a> = LocatedSpan<&'a str, Contexte<'a>>;

/// Entrée au début du texte, profondeur nulle.
pub fn entree(texte: &str) -> Entree<'_> {
    Entree::new_extra(
        texte,
        Contexte {
            source: texte,
            profondeur: 0,
        },
    )
}

pub type PResult<'a, O> = IResult<Entree<'a>, O, VerboseError<Entree<'a>>>;

/// Enveloppe un reconnaisseur en feuille `regle`, blancs initiaux ignorés.
fn jeton<'a, P>(regle: Regle, mut reconnaisseur: P) -> impl FnMut(Entree<'a>) -> PResult<'a, Noeud<'a>>
where
    P: FnMut(Entree<'a>) -> PResult<'a, Entree<'a>>,
{
    move |input| {
        let (input, _) = multispace0::<_, VerboseError<Entree<'a>>>(input)?;
        let (input, frag) = reconnaisseur(input)?;
        let debut = frag.location_offset();
        let texte: &'a str = *frag.fragment();
        let span = Span::new(debut, debut + texte.len());
        Ok((input, Noeud::feuille(regle, span, texte)))
    }
}

pub fn nombre(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    context(
        "number",
        jeton(
            Regle::Number,
            take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        ),
    )(input)
}

/// `+` ou `-` (binaire en somme, ou signe unaire).
pub fn plus_ou_moins(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    alt((jeton(Regle::Plus, tag("+")), jeton(Regle::Minus, tag("-"))))(input)
}

/// `*` ou `/`.
pub fn fois_ou_divise(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    alt((jeton(Regle::Star, tag("*")), jeton(Regle::Slash, tag("/"))))(input)
}

pub fn nom_fonction(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    context("function name", jeton(Regle::NomFonction, alpha1))(input)
}

pub fn paren_ouvrante(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    context("'('", jeton(Regle::ParenOuvrante, tag("(")))(input)
}

pub fn paren_fermante(input: Entree<'_>) -> PResult<'_, Noeud<'_>> {
    context("')'", jeton(Regle::ParenFermante, tag(")")))(input)
}
