//! The clinic's treatment catalog.

use ayur_router::PageTag;

/// One treatment offered by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treatment {
    pub tag: PageTag,
    pub name: &'static str,
    /// Short description shown after the name.
    pub subtitle: &'static str,
    pub duration_mins: u32,
    /// Card image under `/images`.
    pub image: &'static str,
}

impl Treatment {
    /// Route of the treatment page.
    pub fn href(&self) -> &'static str {
        self.tag.route()
    }
}

/// Treatments in the order the home page lists them.
pub const TREATMENTS: [Treatment; 10] = [
    Treatment {
        tag: PageTag::Pizhichil,
        name: "Pizhichil",
        subtitle: "Rejuvenating Oil Therapy",
        duration_mins: 60,
        image: "pizhichil.jpg",
    },
    Treatment {
        tag: PageTag::Abhyanga,
        name: "Abhyanga",
        subtitle: "Therapeutic Oil Massage",
        duration_mins: 60,
        image: "abhyanga.jpg",
    },
    Treatment {
        tag: PageTag::Shirodhara,
        name: "Shirodhara",
        subtitle: "Flowing Oil Treatment",
        duration_mins: 60,
        image: "shirodhara.jpg",
    },
    Treatment {
        tag: PageTag::Nasyam,
        name: "Nasyam",
        subtitle: "Nasal Therapy",
        duration_mins: 60,
        image: "nasyam.jpg",
    },
    Treatment {
        tag: PageTag::Januvasti,
        name: "Januvasti",
        subtitle: "Knee Therapy",
        duration_mins: 60,
        image: "januvasti2.png",
    },
    Treatment {
        tag: PageTag::Shirovasti,
        name: "Shirovasti",
        subtitle: "Head Oil Treatment",
        duration_mins: 60,
        image: "shirovasti2.png",
    },
    Treatment {
        tag: PageTag::Kativasti,
        name: "Kativasti",
        subtitle: "Lower Back Oil Treatment",
        duration_mins: 60,
        image: "kativasti.webp",
    },
    Treatment {
        tag: PageTag::Elakizhi,
        name: "Elakizhi",
        subtitle: "Herbal Pouch Massage",
        duration_mins: 60,
        image: "elakizhi.png",
    },
    Treatment {
        tag: PageTag::Njavarakizhi,
        name: "Njavarakizhi",
        subtitle: "Rice Pouch Therapy",
        duration_mins: 60,
        image: "njavarakizhi.png",
    },
    Treatment {
        tag: PageTag::Netratarpana,
        name: "Netratarpana",
        subtitle: "Eye Therapy",
        duration_mins: 60,
        image: "netratarpana.webp",
    },
];

/// Catalog entry for a treatment view. `None` for Home.
pub fn treatment(tag: PageTag) -> Option<&'static Treatment> {
    TREATMENTS.iter().find(|t| t.tag == tag)
}
