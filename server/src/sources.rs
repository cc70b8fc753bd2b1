use serde::Serialize;

/// A reference backing one of the calculator's figures.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub citation: &'static str,
    pub url: Option<&'static str>,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub fn all() -> Vec<Source> {
    vec![
        Source {
            citation: "American Wind Energy Association. \"Wind Energy Facts at a Glance.\" AWEA.org, American Wind Energy Association, www.awea.org/wind-101/basics-of-wind-energy.",
            url: Some("https://www.awea.org/wind-101/basics-of-wind-energy"),
            description: "Used for: Land use estimates, transport costs, and noise levels.",
            kind: "Industry Data",
        },
        Source {
            citation: "Hardin, Garrett. \"The Tragedy of the Commons.\" Science, vol. 162, no. 3859 (1968): 1243–1248.",
            url: None,
            description: "Used for: Theoretical framework on resource distribution and community impacts.",
            kind: "Academic Source",
        },
        Source {
            citation: "Howe, Cymene. Ecologics: Wind and Power in the Anthropocene. Duke University Press, 2019.",
            url: None,
            description: "Used for: Understanding social and environmental impacts of wind energy projects.",
            kind: "Academic Source",
        },
        Source {
            citation: "Lennon, M. \"Introduction: A Microgrid on the Margins.\" In Subjects of the Sun, Duke University Press (2025), 1–36.",
            url: None,
            description: "Used for: Visual economy and inequality in renewable energy representations.",
            kind: "Academic Source",
        },
        Source {
            citation: "National Renewable Energy Laboratory. \"Texas High Resolution Wind Resource Dataset.\" Data.gov, U.S. Department of Energy, catalog.data.gov/dataset/texas-high-resolution-wind-resource.",
            url: Some("https://catalog.data.gov/dataset/texas-high-resolution-wind-resource"),
            description: "Used for: Wind speed and capacity factor calculations.",
            kind: "Data Source",
        },
        Source {
            citation: "U.S. Energy Information Administration. \"Electricity Generation Emissions.\" EIA.gov, U.S. Department of Energy, www.eia.gov/tools/faqs/faq.php?id=74&t=11.",
            url: Some("https://www.eia.gov/tools/faqs/faq.php?id=74&t=11"),
            description: "Used for: CO₂ emissions calculation (0.4 kg per kWh).",
            kind: "Government Data",
        },
        Source {
            citation: "U.S. Energy Information Administration. \"Levelized Costs of New Generation Resources.\" Annual Energy Outlook, U.S. Department of Energy, www.eia.gov/outlooks/aeo.",
            url: Some("https://www.eia.gov/outlooks/aeo"),
            description: "Used for: Installation costs, electricity prices, operating costs, and solar/hydroelectric cost comparisons.",
            kind: "Economic Data",
        },
        Source {
            citation: "U.S. Environmental Protection Agency. \"Greenhouse Gas Emissions from Transportation.\" EPA.gov, U.S. Environmental Protection Agency, www.epa.gov/greenvehicles/greenhouse-gas-emissions-typical-passenger-vehicle.",
            url: Some("https://www.epa.gov/greenvehicles/greenhouse-gas-emissions-typical-passenger-vehicle"),
            description: "Used for: Car emissions calculation (4.6 tons CO₂ per year).",
            kind: "Government Data",
        },
        Source {
            citation: "U.S. Geological Survey and U.S. Fish and Wildlife Service. \"Wind Energy and Wildlife Interactions.\" USGS.gov, U.S. Geological Survey, www.usgs.gov/faqs/can-wind-turbines-harm-wildlife.",
            url: Some("https://www.usgs.gov/faqs/can-wind-turbines-harm-wildlife"),
            description: "Used for: Wildlife impact assessment.",
            kind: "Government Data",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sources() {
        let sources = all();

        assert_eq!(sources.len(), 9);
        assert_eq!(sources.iter().filter(|s| s.url.is_none()).count(), 3);
        assert!(sources.iter().all(|s| s.description.starts_with("Used for: ")));
    }

    #[test]
    fn test_source_wire_format() {
        let json = serde_json::to_value(&all()[1]).unwrap();

        assert_eq!(json["type"], "Academic Source");
        assert!(json["url"].is_null());
    }
}
