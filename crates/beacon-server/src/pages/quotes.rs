//! Quotes shown on the landing page.

use rand::seq::IndexedRandom;

pub const QUOTES: &[&str] = &[
    "Das Schönste, was wir erleben können, ist das Geheimnisvolle. (Albert Einstein)",
    "Vergiss nie, wie weit du schon gekommen bist.",
    "Die besten Geschichten schreibt das Leben selbst.",
    "Jeder Mensch trägt ein Licht in sich.",
    "Manchmal muss man loslassen, um frei zu sein.",
    "Veränderung beginnt mit dem ersten Schritt.",
    "Wo ein Wille ist, ist auch ein Weg.",
    "Die Stille sagt oft mehr als tausend Worte.",
    "Es ist nie zu spät, das zu werden, was man hätte sein können.",
    "Ein Lächeln ist der kürzeste Weg zwischen zwei Menschen.",
    "Wenn du das Licht nicht findest, sei selbst das Licht.",
    "Liebe ist kein Wort, sondern ein Gefühl, das man lebt.",
    "Die Zeit heilt nicht alles, aber sie rückt vieles ins rechte Licht.",
    "Du bist genug, so wie du bist.",
    "Das Leben ist zu kurz für irgendwann.",
    "Jeder Tag ist eine zweite Chance.",
    "Am Ende wird alles gut. Wenn es nicht gut wird, ist es noch nicht das Ende. (Oscar Wilde)",
    "Glück ist das einzige, das sich verdoppelt, wenn man es teilt.",
    "Man sieht nur mit dem Herzen gut. Das Wesentliche ist für die Augen unsichtbar. (Antoine de Saint-Exupéry)",
    "Die besten Dinge im Leben sind nicht die, die man für Geld bekommt. (Albert Einstein)",
    "Träume nicht dein Leben, sondern lebe deinen Traum.",
    "Wer den Tag mit einem Lächeln beginnt, hat ihn bereits gewonnen.",
    "Hello World!",
    "Automate all the things!",
    "Infrastructure as Code - the future!",
];

/// Uniformly random quote.
pub fn random_quote() -> &'static str {
    QUOTES.choose(&mut rand::rng()).copied().unwrap_or("Hello World!")
}
