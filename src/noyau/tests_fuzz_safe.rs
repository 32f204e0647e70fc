//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler parse + analyse sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - textes valides, puis abîmés (caractère supprimé / inséré)
//! - invariant clé : erreurs non vides => valeur None

use std::time::{Duration, Instant};

use super::analyse::{analyser, ResultatAnalyse};
use super::grammaire::{parse, MSG_IMBRICATION_EXCESSIVE, PROFONDEUR_MAX};
use super::position::offset_vers_position;
use super::session::diagnostic_de_parse;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_suppression(texte: &str, r: &ResultatAnalyse) {
    if !r.erreurs.is_empty() {
        assert!(
            r.valeur.is_none(),
            "valeur malgré diagnostics: texte={texte:?} r={r:?}"
        );
    }
}

fn check_plages_dans_le_texte(texte: &str, r: &ResultatAnalyse) {
    let fin_texte = offset_vers_position(texte, texte.len());
    for e in &r.erreurs {
        assert!(e.plage.debut <= e.plage.fin, "plage inversée: {e:?}");
        assert!(e.plage.fin <= fin_texte, "plage hors texte: {texte:?} {e:?}");
    }
}

/// Analyse deux fois (même parse) + contrôle des invariants.
fn analyser_et_verifier(texte: &str) -> ResultatAnalyse {
    let p = parse(texte);
    assert!(p.issue.consomme <= p.issue.total, "consomme > total: {texte:?}");
    assert_eq!(p.issue.total, texte.len());

    let a = analyser(texte, &p);
    let b = analyser(texte, &p);
    assert_eq!(a, b, "analyse non idempotente: {texte:?}");

    check_suppression(texte, &a);
    check_plages_dans_le_texte(texte, &a);

    // le diagnostic de parse ne doit jamais paniquer non plus
    let _ = diagnostic_de_parse(texte, &p.issue);
    a
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS: [&str; 5] = ["sin", "cos", "tan", "sqrt", "log"];
const OPERATEURS: [char; 4] = ['+', '-', '*', '/'];
const BRUIT: [char; 10] = ['(', ')', '+', '*', '/', '.', ' ', '\n', 'x', 'é'];

fn gen_nombre(rng: &mut Rng) -> String {
    // 0 inclus : utile pour tester ÷0 et log(0)
    let entier = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{entier}.{}", rng.pick(100)),
        1 => format!(".{}", rng.pick(10)),
        _ => format!("{entier}"),
    }
}

fn gen_blanc(rng: &mut Rng) -> &'static str {
    match rng.pick(6) {
        0 => " ",
        1 => "\n",
        _ => "",
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(6) {
        0 => gen_nombre(rng),
        1 | 2 => {
            let op = OPERATEURS[rng.pick(4) as usize];
            let a = gen_expr(rng, depth - 1);
            let b = gen_expr(rng, depth - 1);
            let (s1, s2) = (gen_blanc(rng), gen_blanc(rng));
            format!("{a}{s1}{op}{s2}{b}")
        }
        3 => {
            let signe = if rng.coin() { '-' } else { '+' };
            format!("{signe}{}", gen_expr(rng, depth - 1))
        }
        4 => format!("({})", gen_expr(rng, depth - 1)),
        _ => {
            let f = FONCTIONS[rng.pick(5) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Supprime ou insère un caractère à une position de caractère aléatoire.
fn abimer(rng: &mut Rng, texte: &str) -> String {
    let mut chars: Vec<char> = texte.chars().collect();
    let i = rng.pick(chars.len() as u32 + 1) as usize;
    if rng.coin() && i < chars.len() {
        chars.remove(i);
    } else {
        chars.insert(i, BRUIT[rng.pick(BRUIT.len() as u32) as usize]);
    }
    chars.into_iter().collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_valides() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let texte = gen_expr(&mut rng, 4);
        let r = analyser_et_verifier(&texte);

        // grammaticalement valide : l’AST existe toujours
        assert!(r.ast.is_some(), "pas d’AST: {texte:?} {r:?}");

        if r.erreurs.is_empty() {
            assert!(r.valeur.is_some(), "ni valeur ni diagnostic: {texte:?}");
            seen_ok += 1;
        } else {
            seen_err += 1;
        }
    }

    // on veut voir un mix des deux, sinon le fuzz ne “balaye” rien
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_textes_abimes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let sain = gen_expr(&mut rng, 3);
        let mut texte = abimer(&mut rng, &sain);
        if rng.coin() {
            texte = abimer(&mut rng, &texte);
        }
        analyser_et_verifier(&texte);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let generer = |seed| {
        let mut rng = Rng::new(seed);
        (0..30)
            .map(|_| {
                let t = gen_expr(&mut rng, 3);
                abimer(&mut rng, &t)
            })
            .collect::<Vec<_>>()
    };

    let a = generer(42);
    let b = generer(42);
    assert_eq!(a, b);
    for texte in &a {
        assert_eq!(analyser_et_verifier(texte), analyser_et_verifier(texte));
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let texte = somme_balancee("0.5", 800);
    let r = analyser_et_verifier(&texte);
    budget(t0, max);

    assert!(r.erreurs.is_empty(), "{:?}", r.erreurs);
    // 800 * 0.5 = 400, exact en binaire
    assert_eq!(r.valeur, Some(400.0));
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    let n = PROFONDEUR_MAX - 1;
    let texte = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(analyser_et_verifier(&texte).valeur, Some(1.0));

    // 10 000 niveaux : échec positionné, jamais de débordement de pile
    let n = 10_000;
    let t0 = Instant::now();
    let max = Duration::from_secs(5);
    for texte in [
        format!("{}1{}", "(".repeat(n), ")".repeat(n)),
        format!("{}1{}", "sqrt(".repeat(n), ")".repeat(n)),
        format!("{}1", "-".repeat(n)),
    ] {
        let r = analyser_et_verifier(&texte);
        assert!(
            r.erreurs.iter().any(|e| e.message == MSG_IMBRICATION_EXCESSIVE),
            "{:?}",
            &texte[..8]
        );
        assert!(r.valeur.is_none());
        budget(t0, max);
    }

    // appels non fermés : une erreur par '(' plus la profondeur
    let n = 100;
    let sans_fin = format!("{}1", "sqrt(".repeat(n));
    let r = analyser_et_verifier(&sans_fin);
    assert_eq!(r.erreurs.len(), n + 1);
    assert!(r.valeur.is_none());
}
