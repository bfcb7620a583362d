//! Nugget fun facts shown in the rotating banner. The list is static and can
//! be extended freely at the end.

use axum::Json;
use rand::seq::SliceRandom;
use serde::Serialize;

pub const FUN_FACTS: &[&str] = &[
    "Chicken Nuggets wurden 1963 von Robert C. Baker an der Cornell University erfunden.",
    "McDonald's McNuggets kamen 1983 in den USA, 1984 in Deutschland auf die Speisekarte.",
    "Die ersten McNuggets gab es mit vier Saucen: Honey, Sweet & Sour, Hot Mustard und BBQ.",
    "McDonald's McNuggets gibt es in genau 4 Formen: Boot, Glocke, Kugel und Knochen.",
    "Die goldene Farbe von Nuggets kommt von der Panade und dem Frittieren.",
    "McDonald's verkauft weltweit etwa 2,36 Milliarden McNuggets pro Jahr.",
    "Ein durchschnittliches Nugget wiegt etwa 17 Gramm.",
    "Für ein einzelnes Nugget braucht man rechnerisch etwa 8-10 Gramm Hühnerfleisch.",
    "Aus einem Huhn können theoretisch etwa 80-100 Nuggets hergestellt werden.",
    "Hühner können über 100 verschiedene Gesichter erkennen – auch menschliche.",
    "Hühner sind die engsten lebenden Verwandten des Tyrannosaurus Rex.",
    "Ein Nugget hat etwa 45-50 Kalorien.",
    "Ein 6er-Nugget liefert etwa 20 Gramm Protein – gut ein Drittel des Tagesbedarfs.",
    "Der teuerste Chicken Nugget wurde 2021 für 99.997 USD versteigert – er sah aus wie ein Among Us-Charakter.",
    "Ein Mann in den USA aß 2017 insgesamt 746 Nuggets in 8 Stunden – Weltrekord.",
    "Hühnerfleisch hat einen geringeren CO2-Fußabdruck als Rind- oder Schweinefleisch.",
];

#[derive(Serialize)]
pub struct FunFactResponse {
    pub fact: &'static str,
}

/// GET /api/v1/funfact
pub async fn handle_fun_fact() -> Json<FunFactResponse> {
    let fact = FUN_FACTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FUN_FACTS[0]);
    Json(FunFactResponse { fact })
}
