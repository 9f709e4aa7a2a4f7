//! Bundled reference tables. Order matters: lookups that stop at the first
//! match walk these tables front to back.

use crate::models::{Brand, ConcernGuide, Ingredient, Product, Routine, SafetyGrade, Step};
use crate::schema::{
    PRODUCT_TYPE_CLEANSER,
    PRODUCT_TYPE_ESSENCE,
    PRODUCT_TYPE_EYE_CREAM,
    PRODUCT_TYPE_LIP_CARE,
    PRODUCT_TYPE_MOISTURIZER,
    PRODUCT_TYPE_SERUM,
    PRODUCT_TYPE_SLEEPING_MASK,
    PRODUCT_TYPE_SUNSCREEN,
    PRODUCT_TYPE_TONER,
};

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn product(
    name: &str,
    product_type: &str,
    price_usd: u32,
    benefits: &[&str],
    skin_types: &[&str],
) -> Product {
    Product {
        name: name.to_string(),
        product_type: product_type.to_string(),
        price_usd,
        benefits: list(benefits),
        skin_types: list(skin_types),
    }
}

fn step(number: u8, step_type: &str, description: &str) -> Step {
    Step {
        number,
        step_type: step_type.to_string(),
        description: description.to_string(),
    }
}

pub fn brands() -> Vec<Brand> {
    vec![
        Brand {
            key: "sulwhasoo".to_string(),
            name: "Sulwhasoo (설화수)".to_string(),
            origin: "South Korea".to_string(),
            founded: 1966,
            category: "Luxury".to_string(),
            price_range: "$50-300".to_string(),
            key_ingredients: list(&["Ginseng", "Jadecite", "Korean Herbs"]),
            products: vec![
                product(
                    "First Care Activating Serum",
                    PRODUCT_TYPE_SERUM,
                    90,
                    &["Anti-aging", "Brightening", "Firming"],
                    &["All", "Mature"],
                ),
                product(
                    "Concentrated Ginseng Renewing Cream",
                    PRODUCT_TYPE_MOISTURIZER,
                    280,
                    &["Deep moisturizing", "Anti-wrinkle", "Regeneration"],
                    &["Dry", "Mature"],
                ),
            ],
            signature: Some("Traditional Korean herbal medicine meets modern skincare".to_string()),
            best_for: Some("Mature skin, anti-aging, luxury skincare experience".to_string()),
        },
        Brand {
            key: "cosrx".to_string(),
            name: "COSRX".to_string(),
            origin: "South Korea".to_string(),
            founded: 2013,
            category: "Affordable/Effective".to_string(),
            price_range: "$10-30".to_string(),
            key_ingredients: list(&["Snail Secretion", "AHA", "BHA", "Niacinamide"]),
            products: vec![
                product(
                    "Snail 96 Mucin Power Essence",
                    PRODUCT_TYPE_ESSENCE,
                    17,
                    &["Healing", "Moisturizing", "Acne recovery"],
                    &["Acne-prone", "Sensitive", "Dry"],
                ),
                product(
                    "AHA/BHA Clarifying Treatment Toner",
                    PRODUCT_TYPE_TONER,
                    17,
                    &["Exfoliation", "Pore care", "Texture improvement"],
                    &["Oily", "Combination", "Acne-prone"],
                ),
            ],
            signature: Some("\"Expecting Tomorrow\": simple, effective ingredients".to_string()),
            best_for: Some("Acne-prone skin, sensitive skin, beginners".to_string()),
        },
        Brand {
            key: "laneige".to_string(),
            name: "Laneige (라네즈)".to_string(),
            origin: "South Korea".to_string(),
            founded: 1994,
            category: "Premium".to_string(),
            price_range: "$20-80".to_string(),
            key_ingredients: list(&["Water Science", "Hydro Ionized Mineral Water"]),
            products: vec![
                product(
                    "Water Sleeping Mask",
                    PRODUCT_TYPE_SLEEPING_MASK,
                    34,
                    &["Overnight hydration", "Skin barrier repair"],
                    &["Dry", "Dehydrated", "All"],
                ),
                product(
                    "Lip Sleeping Mask",
                    PRODUCT_TYPE_LIP_CARE,
                    24,
                    &["Lip hydration", "Exfoliation", "Softening"],
                    &["All"],
                ),
            ],
            signature: Some("Water Science Technology".to_string()),
            best_for: Some("Dry skin, dehydration, overnight treatments".to_string()),
        },
    ]
}

#[allow(clippy::too_many_lines)]
pub fn ingredients() -> Vec<Ingredient> {
    vec![
        Ingredient {
            key: "snail_secretion".to_string(),
            name: "Snail Secretion Filtrate".to_string(),
            korean_name: "달팽이 분비물".to_string(),
            benefits: list(&["Healing", "Moisturizing", "Anti-inflammatory", "Acne scar reduction"]),
            safety_grade: SafetyGrade::A,
            suitable_for: list(&["Sensitive", "Acne-prone", "Damaged skin"]),
            concentration: "Usually 92-96%".to_string(),
            incompatible: Vec::new(),
            also_known_as: list(&["Snail mucin"]),
            note: Some("Rich in allantoin, glycolic acid, elastin and collagen".to_string()),
        },
        Ingredient {
            key: "ginseng".to_string(),
            name: "Ginseng Extract".to_string(),
            korean_name: "인삼 추출물".to_string(),
            benefits: list(&["Anti-aging", "Circulation boost", "Firming", "Brightening"]),
            safety_grade: SafetyGrade::A,
            suitable_for: list(&["Mature", "Dull", "All skin types"]),
            concentration: "Varies".to_string(),
            incompatible: Vec::new(),
            also_known_as: list(&["Korean Red Ginseng"]),
            note: Some("Active compounds: ginsenosides, saponins".to_string()),
        },
        Ingredient {
            key: "niacinamide".to_string(),
            name: "Niacinamide (Vitamin B3)".to_string(),
            korean_name: "나이아신아마이드".to_string(),
            benefits: list(&[
                "Pore minimizing",
                "Oil control",
                "Brightening",
                "Barrier strengthening",
            ]),
            safety_grade: SafetyGrade::A,
            suitable_for: list(&["Oily", "Combination", "Acne-prone"]),
            concentration: "2-10%".to_string(),
            incompatible: list(&["Vitamin C at same time"]),
            also_known_as: list(&["Vitamin B3", "Nicotinamide"]),
            note: Some("Sweet spot around 5%".to_string()),
        },
        Ingredient {
            key: "hyaluronic_acid".to_string(),
            name: "Hyaluronic Acid".to_string(),
            korean_name: "히알루론산".to_string(),
            benefits: list(&["Deep hydration", "Plumping", "Water retention"]),
            safety_grade: SafetyGrade::A,
            suitable_for: list(&["All skin types", "Especially dry"]),
            concentration: "0.1-2%".to_string(),
            incompatible: Vec::new(),
            also_known_as: Vec::new(),
            note: None,
        },
        Ingredient {
            key: "retinol".to_string(),
            name: "Retinol".to_string(),
            korean_name: "레티놀".to_string(),
            benefits: list(&["Anti-aging", "Acne treatment", "Skin renewal"]),
            safety_grade: SafetyGrade::B,
            suitable_for: list(&["Mature", "Acne-prone"]),
            concentration: "0.25-1%".to_string(),
            incompatible: list(&["AHA", "BHA", "Vitamin C", "Benzoyl Peroxide"]),
            also_known_as: Vec::new(),
            note: None,
        },
        Ingredient {
            key: "centella_asiatica".to_string(),
            name: "Centella Asiatica".to_string(),
            korean_name: "센텔라 아시아티카".to_string(),
            benefits: list(&["Soothing", "Anti-inflammatory", "Wound healing", "Acne treatment"]),
            safety_grade: SafetyGrade::A,
            suitable_for: list(&["Sensitive", "Irritated skin", "Acne-prone"]),
            concentration: "Varies".to_string(),
            incompatible: Vec::new(),
            also_known_as: list(&["Cica", "Tiger grass", "Gotu kola"]),
            note: Some("Active compounds: asiaticoside, madecassoside, asiatic acid".to_string()),
        },
        Ingredient {
            key: "propolis".to_string(),
            name: "Propolis Extract".to_string(),
            korean_name: "프로폴리스".to_string(),
            benefits: list(&["Antibacterial", "Anti-inflammatory", "Healing", "Moisturizing"]),
            safety_grade: SafetyGrade::B,
            suitable_for: list(&["Acne-prone", "Dry"]),
            concentration: "Varies".to_string(),
            incompatible: Vec::new(),
            also_known_as: list(&["Bee propolis"]),
            note: Some("Rare allergic reactions possible; patch test first".to_string()),
        },
        Ingredient {
            key: "rice_water".to_string(),
            name: "Rice Water".to_string(),
            korean_name: "쌀물".to_string(),
            benefits: list(&["Brightening", "Softening", "Anti-aging", "Gentle exfoliation"]),
            safety_grade: SafetyGrade::A,
            suitable_for: list(&["All skin types"]),
            concentration: "Varies".to_string(),
            incompatible: Vec::new(),
            also_known_as: list(&["Rice bran"]),
            note: Some("Amino acids, vitamins B and E, minerals".to_string()),
        },
    ]
}

pub fn routines() -> Vec<Routine> {
    vec![
        Routine {
            key: "basic_korean".to_string(),
            name: "Basic Korean Skincare Routine".to_string(),
            description: "The fundamental K-Beauty 7-step routine".to_string(),
            target_skin: "All skin types".to_string(),
            steps: vec![
                step(1, PRODUCT_TYPE_CLEANSER, "Oil cleanser (if wearing makeup)"),
                step(2, PRODUCT_TYPE_CLEANSER, "Water-based cleanser"),
                step(3, PRODUCT_TYPE_TONER, "Hydrating toner"),
                step(4, PRODUCT_TYPE_ESSENCE, "First essence or treatment"),
                step(5, PRODUCT_TYPE_SERUM, "Targeted treatment serum"),
                step(6, PRODUCT_TYPE_MOISTURIZER, "Moisturizer"),
                step(7, PRODUCT_TYPE_SUNSCREEN, "SPF 30+ (AM only)"),
            ],
        },
        Routine {
            key: "anti_aging".to_string(),
            name: "K-Beauty Anti-Aging Routine".to_string(),
            description: "Advanced routine for mature skin concerns".to_string(),
            target_skin: "Mature, aging skin".to_string(),
            steps: vec![
                step(1, PRODUCT_TYPE_CLEANSER, "Gentle cleansing oil"),
                step(2, PRODUCT_TYPE_CLEANSER, "Low pH cleanser"),
                step(3, PRODUCT_TYPE_TONER, "Anti-aging toner"),
                step(4, PRODUCT_TYPE_ESSENCE, "Ginseng or fermented essence"),
                step(5, PRODUCT_TYPE_SERUM, "Retinol or peptide serum"),
                step(6, PRODUCT_TYPE_EYE_CREAM, "Anti-aging eye cream"),
                step(7, PRODUCT_TYPE_MOISTURIZER, "Rich moisturizer"),
                step(8, PRODUCT_TYPE_SLEEPING_MASK, "Overnight mask (PM)"),
            ],
        },
        Routine {
            key: "acne_prone".to_string(),
            name: "K-Beauty Acne-Prone Routine".to_string(),
            description: "Gentle but effective routine for troubled skin".to_string(),
            target_skin: "Acne-prone, oily skin".to_string(),
            steps: vec![
                step(1, PRODUCT_TYPE_CLEANSER, "Gentle low pH cleanser"),
                step(2, PRODUCT_TYPE_TONER, "BHA toner (2-3x per week)"),
                step(3, PRODUCT_TYPE_ESSENCE, "Snail mucin essence"),
                step(4, PRODUCT_TYPE_SERUM, "Niacinamide serum"),
                step(5, PRODUCT_TYPE_MOISTURIZER, "Lightweight gel moisturizer"),
                step(6, PRODUCT_TYPE_SUNSCREEN, "Non-comedogenic SPF (AM)"),
            ],
        },
    ]
}

fn concern(key: &str, ingredients: &[&str], avoid: &str, routine: &str) -> ConcernGuide {
    ConcernGuide {
        key: key.to_string(),
        ingredients: list(ingredients),
        avoid: avoid.to_string(),
        routine: routine.to_string(),
    }
}

pub fn concerns() -> Vec<ConcernGuide> {
    vec![
        concern(
            "acne",
            &["Salicylic acid (BHA)", "Niacinamide", "Centella asiatica", "Tea tree"],
            "Excess oil, comedogenic ingredients",
            "Double cleanse -> BHA toner -> niacinamide serum -> light moisturizer",
        ),
        concern(
            "aging",
            &["Retinol", "Vitamin C", "Peptides", "Hyaluronic acid"],
            "Harsh scrubs, alcohol-based toners",
            "Cleanse -> vitamin C (AM) -> retinol (PM) -> rich moisturizer",
        ),
        concern(
            "pigmentation",
            &["Vitamin C", "Niacinamide", "Arbutin", "Kojic acid"],
            "Harsh peels, fragrance",
            "Cleanse -> brightening serum -> moisturizer -> sunscreen every day",
        ),
        concern(
            "dryness",
            &["Hyaluronic acid", "Ceramides", "Squalane", "Glycerin"],
            "Alcohol-based products, over-cleansing",
            "Gentle cleanse -> hyaluronic acid -> oil or cream -> sleeping mask",
        ),
        concern(
            "sensitivity",
            &["Centella asiatica", "Panthenol", "Aloe", "Fragrance-free formulas"],
            "Fragrance, alcohol, strong actives",
            "Very gentle cleanse -> soothing toner -> barrier cream -> mineral sunscreen",
        ),
    ]
}
