//! Prompt template for the advisory request

/// Build the advisory prompt for `crop`
///
/// The output is deterministic for a given crop name.
pub fn build_prompt(crop: &str) -> String {
    format!(
        r#"You are an expert agricultural advisor. Provide comprehensive advisory information for the crop: "{crop}".

Return ONLY valid JSON (no markdown, no extra text) in exactly this structure:
{{
  "crop": "{crop}",
  "emoji": "<a single relevant emoji for the crop>",
  "overview": "<2-3 sentence overview of the crop>",
  "best_season": {{
    "title": "Best Season",
    "primary": "<main growing season>",
    "details": "<detailed season info with months>"
  }},
  "fertilizers": {{
    "title": "Best Fertilizers",
    "primary": "<top fertilizer recommendation>",
    "list": ["<fertilizer 1>", "<fertilizer 2>", "<fertilizer 3>", "<fertilizer 4>"]
  }},
  "insecticides": {{
    "title": "Pest & Disease Control",
    "primary": "<main pest threat>",
    "list": ["<insecticide/treatment 1>", "<insecticide/treatment 2>", "<insecticide/treatment 3>"]
  }},
  "conditions": {{
    "title": "Ideal Conditions",
    "soil": "<best soil type>",
    "water": "<water requirements>",
    "sunlight": "<sunlight needs>",
    "spacing": "<plant spacing>"
  }},
  "techniques": {{
    "title": "Best Farming Techniques",
    "list": ["<technique 1>", "<technique 2>", "<technique 3>", "<technique 4>"]
  }},
  "timeline": {{
    "title": "Crop Timeline",
    "phases": [
{phases}
    ]
  }},
  "precautions": {{
    "title": "Key Precautions",
    "list": ["<precaution 1>", "<precaution 2>", "<precaution 3>", "<precaution 4>"]
  }},
  "care_tips": {{
    "title": "Care & Pro Tips",
    "list": ["<tip 1>", "<tip 2>", "<tip 3>", "<tip 4>"]
  }},
  "yield_info": {{
    "title": "Expected Yield",
    "average": "<average yield per acre/hectare>",
    "market": "<market value info>"
  }}
}}"#,
        crop = crop,
        phases = phase_lines(),
    )
}

/// Growth phases the timeline must cover, in order
pub const PHASES: [&str; 7] = [
    "Land Preparation",
    "Sowing / Planting",
    "Germination",
    "Vegetative Growth",
    "Flowering",
    "Maturation",
    "Harvesting",
];

fn phase_lines() -> String {
    PHASES
        .iter()
        .map(|p| {
            format!(
                r#"      {{"phase": "{p}", "duration": "<X days/weeks>", "details": "<what to do>"}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",\n")
}
