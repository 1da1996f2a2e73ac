use serde::{Deserialize, Serialize};

/// Fixed-price consulting offering presented after scoring and fulfilled by
/// the external payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Basic,
    Pro,
    Enterprise,
}

impl PackageTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Basic, Self::Pro, Self::Enterprise]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|tier| tier.id() == id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Package {
    pub tier: PackageTier,
    pub name: &'static str,
    /// USD, integer dollars.
    pub price: u32,
    pub description: &'static str,
    pub timeline: &'static str,
    pub process: Vec<&'static str>,
    pub best_for: &'static str,
}

/// Single source of truth for the consulting package table.
#[derive(Debug)]
pub struct PackageCatalog {
    packages: Vec<Package>,
}

impl PackageCatalog {
    pub fn standard() -> Self {
        Self {
            packages: standard_packages(),
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, tier: PackageTier) -> &Package {
        self.packages
            .iter()
            .find(|package| package.tier == tier)
            .expect("catalog covers every tier")
    }
}

fn standard_packages() -> Vec<Package> {
    vec![
        Package {
            tier: PackageTier::Basic,
            name: "Basic Package",
            price: 499,
            description: "Essential digital transformation tools and guidance",
            timeline: "2-4 weeks",
            process: vec![
                "Initial consultation within 48 hours",
                "Assessment review and roadmap creation: 1 week",
                "Implementation guidance: 2-3 weeks",
            ],
            best_for: "Organizations starting their digital transformation journey",
        },
        Package {
            tier: PackageTier::Pro,
            name: "Professional Package",
            price: 999,
            description: "Advanced features and dedicated consultation",
            timeline: "4-8 weeks",
            process: vec![
                "Priority consultation within 24 hours",
                "Comprehensive assessment review: 1 week",
                "Detailed roadmap and strategy: 1-2 weeks",
                "Implementation support: 2-5 weeks",
            ],
            best_for: "Growing organizations ready to accelerate their digital capabilities",
        },
        Package {
            tier: PackageTier::Enterprise,
            name: "Enterprise Package",
            price: 1999,
            description: "Full-scale transformation support and implementation",
            timeline: "8-12 weeks",
            process: vec![
                "Immediate priority consultation",
                "Executive team assessment review: 1 week",
                "Comprehensive strategy development: 2-3 weeks",
                "Full implementation support: 4-8 weeks",
            ],
            best_for: "Large organizations seeking comprehensive digital transformation",
        },
    ]
}
