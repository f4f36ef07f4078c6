//! # Section Catalog
//!
//! The static list of PIF sections, in final document order. Ordering here
//! is significant: it is the order drafts are assembled, persisted, and
//! rendered in, regardless of which generation call resolves first.

/// Marker pair bracketing required standard text. Both markers must survive
/// every drafting and revision pass byte for byte.
pub const STANDARD_TEXT_BEGIN: &str = "[BEGIN STANDARD TEXT]";
pub const STANDARD_TEXT_END: &str = "[END STANDARD TEXT]";

/// One named subdivision of the target document.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    /// Stable identifier used for persistence and grounding-bundle lookup.
    pub key: &'static str,
    /// Document title. May contain `{Country}`, which is always substituted.
    pub title: &'static str,
    /// Free-form drafting instructions. May contain `{Country}`; whether
    /// that placeholder is substituted is a configuration choice.
    pub instructions: &'static str,
    pub word_limit: Option<u32>,
    /// Fixed boilerplate the draft must reproduce verbatim, wrapped in the
    /// standard-text marker pair.
    pub standard_text: Option<&'static str>,
    /// Structural flag: forbid numbered headings inside the section body.
    pub forbid_numbered_headings: bool,
    /// Render hint: a section whose body is mostly legal/policy narrative.
    /// When such a section arrives without explicit bullets, the renderer
    /// regroups it into synthetic bullets.
    pub policy_style: bool,
}

const fn section(key: &'static str, title: &'static str, instructions: &'static str) -> SectionSpec {
    SectionSpec {
        key,
        title,
        instructions,
        word_limit: None,
        standard_text: None,
        forbid_numbered_headings: false,
        policy_style: false,
    }
}

/// All tracked sections, in final output order.
pub static SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        word_limit: Some(400),
        forbid_numbered_headings: true,
        ..section(
            "rationale_intro",
            "A. Project Rationale",
            "Write a multi-paragraph narrative covering the country context, the drivers \
             behind the project, its objective, the baseline without the project, the \
             envisioned outcomes, and alignment with national priorities.",
        )
    },
    SectionSpec {
        standard_text: Some(
            "As part of the UNFCCC, the Paris Agreement (2015) strengthened the global \
             response to climate change. Article 13 established the Enhanced Transparency \
             Framework (ETF), under which Parties report on mitigation, adaptation and \
             support received and needed.",
        ),
        ..section(
            "paris_etf",
            "The Paris Agreement and the Enhanced Transparency Framework",
            "After the opening paragraph, explain in one further paragraph why the ETF's \
             reporting requirements are demanding for developing country Parties.",
        )
    },
    SectionSpec {
        word_limit: Some(350),
        ..section(
            "climate_transparency",
            "Climate Transparency in {Country}",
            "Explain where {Country} is not yet fully complying with ETF requirements, \
             actions taken to date, and the 'without project' trajectory. Identify the \
             drivers that would sustain the status quo. Include one paragraph on the \
             country's geography, population and climate with specific figures, and one \
             on its reporting record (NCs, BURs, BTRs, national inventories) with dates.",
        )
    },
    SectionSpec {
        standard_text: Some(
            "{Country} signed the UNFCCC on [TBD], and ratified it on [TBD]. It also \
             ratified the Kyoto Protocol on [TBD], and the Paris Agreement on [TBD]. The \
             following sections describe {Country}'s institutional framework for climate \
             action, key legislation and policies, and ongoing transparency initiatives.",
        ),
        ..section(
            "national_framework",
            "National Transparency Framework",
            "Fill in the ratification dates where they can be established from the \
             provided material; otherwise leave the [TBD] markers in place.",
        )
    },
    SectionSpec {
        word_limit: Some(500),
        ..section(
            "institutional_framework",
            "Institutional Framework for Climate Action",
            "Describe the governmental institutional framework for climate transparency \
             in {Country}: the lead ministry or agency, inter-ministerial coordination, \
             legal mandates, data-sharing arrangements, and subnational roles. List each \
             institution with its role in data collection, finance tracking, or policy.",
        )
    },
    SectionSpec {
        word_limit: Some(500),
        policy_style: true,
        ..section(
            "policy_framework",
            "National Policy Framework",
            "Describe {Country}'s national climate vision and targets (NDCs, long-term \
             strategies, climate acts) and how they align with ETF mandates. Cover the \
             foundational laws, decrees and state plans, with years, and close with the \
             gaps or pending updates in the framework.",
        )
    },
    section(
        "unfccc_reporting",
        "Official Reporting to the UNFCCC",
        "Compile {Country}'s submissions to the UNFCCC with standardized names (e.g. \
         'First BUR', 'NC3', 'BTR1') and submission years, most recent first. Present \
         them as a compact table of report name, year, and a one-line comment.",
    ),
    SectionSpec {
        word_limit: Some(400),
        ..section(
            "ndc_tracking",
            "NDC Tracking Module",
            "Write, in paragraph form, the baseline for NDC tracking in {Country}: \
             current coordination, pilots, templates, integration with planning, gaps in \
             mandates, tools and reporting cycles, subnational coverage, and needs.",
        )
    },
    SectionSpec {
        word_limit: Some(400),
        ..section(
            "support_module",
            "Support Needed and Received Module",
            "Write, in paragraph form, the baseline for tracking support needed and \
             received in {Country}: finance flows, technical assistance, capacity \
             building, tracking systems and templates, institutional mandates, and gaps \
             such as disaggregation or off-budget flows.",
        )
    },
    section(
        "baseline_initiatives",
        "Other Baseline Initiatives",
        "List the relevant transparency-related projects and programmes in {Country} as \
         a structured list: programme name, leading ministry or entity, duration, value \
         in USD, and relationship with the ETF and the national transparency system.",
    ),
];

/// Looks up a section spec by its stable key.
pub fn find(key: &str) -> Option<&'static SectionSpec> {
    SECTIONS.iter().find(|s| s.key == key)
}

/// Substitutes the `{Country}` placeholder in a template string.
pub fn substitute_country(template: &str, country: &str) -> String {
    template.replace("{Country}", country)
}
