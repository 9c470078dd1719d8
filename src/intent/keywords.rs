//! Keyword lists for the chat intent router.
//!
//! Each list is matched as whole words, case-insensitively. Multi-word
//! entries tolerate any run of whitespace between words. Medication names are
//! opaque triggers only.

pub struct KeywordSet {
    pub english: &'static [&'static str],
    pub spanish: &'static [&'static str],
}

pub const OPEN_STATUS: KeywordSet = KeywordSet {
    english: &[
        "hours", "hour", "open", "opens", "opening", "closed", "close", "closes", "closing",
        "today", "now", "tonight", "tomorrow",
    ],
    spanish: &[
        "horario", "horarios", "hora", "horas", "abierto", "abiertos", "abierta", "abiertas",
        "abren", "abre", "cerrado", "cerrados", "cerrada", "cierran", "cierra", "hoy", "ahora",
        "mañana",
    ],
};

pub const PROVIDERS: KeywordSet = KeywordSet {
    english: &[
        "doctor", "doctors", "physician", "physicians", "provider", "providers", "clinician",
        "clinicians", "nurse practitioner", "internist",
    ],
    spanish: &[
        "médico", "médicos", "medico", "medicos", "médica", "doctora", "doctoras", "doctores",
        "proveedor", "proveedores", "enfermera", "enfermero",
    ],
};

pub const INSURANCE: KeywordSet = KeywordSet {
    english: &[
        "insurance", "insurances", "insurer", "insured", "coverage", "covered", "copay",
        "co-pay", "deductible", "in-network", "out-of-network", "self-pay", "superbill",
        "aetna", "cigna", "blue cross", "blue shield", "bcbs", "carefirst", "unitedhealthcare",
        "united healthcare", "medicare", "medicaid", "tricare", "humana",
    ],
    spanish: &["seguro", "seguros", "aseguranza", "cobertura", "copago", "deducible"],
};

pub const WEIGHT_MANAGEMENT: KeywordSet = KeywordSet {
    english: &[
        "weight", "weight loss", "lose weight", "nutrition", "nutritional", "diet", "metabolic",
        "metabolism", "obesity", "bmi", "inbody", "body composition", "body fat", "muscle mass",
        "wegovy", "ozempic", "mounjaro", "zepbound", "saxenda", "semaglutide", "tirzepatide",
        "glp-1", "glp1",
    ],
    spanish: &[
        "peso", "bajar de peso", "nutrición", "nutricion", "dieta", "metabólico", "metabolico",
        "metabolismo", "obesidad", "composición corporal", "composicion corporal",
        "grasa corporal",
    ],
};

/// Frequent Spanish words that rarely occur in English chat messages.
pub const SPANISH_MARKERS: &[&str] = &[
    "hola", "gracias", "favor", "usted", "ustedes", "tienen", "necesito", "quiero", "cita",
    "donde", "cuando", "puedo", "están", "esta", "estan", "qué", "cuál", "cuales", "buenos",
    "buenas", "días", "tardes", "para", "por", "con", "los", "las", "una", "hay",
];
