//! Static site content shown behind the chat widget.

use crate::enhance::PortfolioItem;

pub const BRAND: &str = "OrbitX";
pub const HERO_HEADLINE: &str = "Creative design that puts your brand in orbit";
pub const HERO_TAGLINE: &str = "Logos · Branding · Social Media · Packaging · Print";

pub struct Service {
    pub name: &'static str,
    pub summary: &'static str,
    pub price_range: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        name: "Logo Design & Branding",
        summary: "Custom logo design with complete brand identity",
        price_range: "₹2,000 - ₹15,000",
    },
    Service {
        name: "Social Media Design",
        summary: "Engaging social media visuals and content",
        price_range: "₹3,000 - ₹20,000",
    },
    Service {
        name: "Flyer Design",
        summary: "Professional marketing flyers and promotions",
        price_range: "₹1,000 - ₹5,000",
    },
    Service {
        name: "Business Card Design",
        summary: "Premium business card designs",
        price_range: "₹500 - ₹3,000",
    },
    Service {
        name: "Packaging Design",
        summary: "Professional product packaging solutions",
        price_range: "₹5,000 - ₹25,000",
    },
    Service {
        name: "Invitation Card Design",
        summary: "Custom invitation cards for all occasions",
        price_range: "₹800 - ₹4,000",
    },
];

/// Stat label and the text its counter animates towards
pub const STATS: &[(&str, &str)] = &[
    ("Projects Delivered", "250+"),
    ("Happy Clients", "120+"),
    ("Years of Experience", "5+"),
    ("Starting Price", "₹500"),
];

/// Filter buttons: label and filter expression
pub const PORTFOLIO_FILTERS: &[(&str, &str)] = &[
    ("All", "*"),
    ("Logo", ".logo-design"),
    ("Social", ".social-media"),
    ("Flyers", ".flyer-design"),
    ("Packaging", ".packaging"),
    ("Invites", ".invitation-cards"),
];

pub fn portfolio_items() -> Vec<PortfolioItem> {
    vec![
        PortfolioItem::new(
            "Gardenia Indoor Plants - Complete Branding",
            "Gardenia Indoor Plants",
            "Logo Design",
            &["logo-design", "branding", "nature", "plants"],
        ),
        PortfolioItem::new(
            "Miracle Paws - Pet Care Branding",
            "Miracle Paws",
            "Logo Design",
            &["logo-design", "pets", "veterinary", "branding"],
        ),
        PortfolioItem::new(
            "Festival Social Media Campaign",
            "Various Clients",
            "Social Media Design",
            &["social-media", "festivals", "indian culture", "celebrations"],
        ),
        PortfolioItem::new(
            "Malabar Restaurant Promotion",
            "Malabar Restaurant",
            "Flyer Design",
            &["flyer-design", "restaurant", "food", "kerala"],
        ),
        PortfolioItem::new(
            "CakeVilla Bakery Promotion",
            "CakeVilla Bakery",
            "Flyer Design",
            &["flyer-design", "bakery", "cakes", "sweets"],
        ),
        PortfolioItem::new(
            "Suhana Biryani Masala Packaging",
            "Suhana Spices",
            "Packaging Design",
            &["packaging", "spices", "food", "indian"],
        ),
        PortfolioItem::new(
            "Elegant Wedding Invitation",
            "Wedding Client",
            "Invitation Cards",
            &["invitation-cards", "wedding", "traditional", "elegant"],
        ),
    ]
}
