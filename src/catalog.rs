use std::sync::LazyLock;

use serde::Serialize;
use utoipa::ToSchema;

/// A campus restaurant and its full menu. The catalog is reference data:
/// built once at first use and never mutated afterwards. Orders copy the
/// display name and prices out of it, so later catalog edits do not touch
/// rows that were already persisted.
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub rating: f32,
    pub delivery_time: String,
    pub menu: Vec<MenuCategory>,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
}

pub fn all() -> &'static [Restaurant] {
    &CATALOG
}

pub fn find(restaurant_id: &str) -> Option<&'static Restaurant> {
    CATALOG.iter().find(|r| r.id == restaurant_id)
}

fn category(name: &str, items: &[(&str, f64)]) -> MenuCategory {
    MenuCategory {
        name: name.to_string(),
        items: items
            .iter()
            .map(|(name, price)| MenuItem {
                name: name.to_string(),
                price: *price,
            })
            .collect(),
    }
}

static CATALOG: LazyLock<Vec<Restaurant>> = LazyLock::new(|| {
    vec![
        Restaurant {
            id: "main_canteen".to_string(),
            name: "Nalambagam Canteen".to_string(),
            image: "klu_nalambagam.jpg".to_string(),
            description: "Authentic South Indian cuisine with fresh ingredients and traditional flavors".to_string(),
            rating: 4.5,
            delivery_time: "15-20 min".to_string(),
            menu: vec![
                category(
                    "breakfast",
                    &[
                        ("Idli", 8.0),
                        ("Masala Dosa", 45.0),
                        ("Pongal", 35.0),
                        ("Vada", 8.0),
                        ("Poori Set", 30.0),
                    ],
                ),
                category(
                    "lunch",
                    &[
                        ("Veg Meals", 70.0),
                        ("Special Meals", 90.0),
                        ("Chapati", 15.0),
                        ("Chicken Fried Rice", 100.0),
                        ("Veg Fried Rice", 70.0),
                        ("Egg Fried Rice", 80.0),
                        ("Biryani", 110.0),
                        ("Plain Biryani", 90.0),
                    ],
                ),
                category(
                    "snacks",
                    &[
                        ("Samosa", 15.0),
                        ("Bonda", 20.0),
                        ("Sandwich", 35.0),
                        ("Pani Puri", 30.0),
                        ("Masala Puri", 40.0),
                    ],
                ),
                category(
                    "beverages",
                    &[
                        ("Tea", 10.0),
                        ("Coffee", 15.0),
                        ("Buttermilk", 20.0),
                        ("Fresh Juice", 35.0),
                    ],
                ),
            ],
        },
        Restaurant {
            id: "madurai_lee".to_string(),
            name: "Madurai Lee Corner".to_string(),
            image: "madurai_lee_corner_logo.jpg".to_string(),
            description: "Modern cafe serving premium coffee, teas, and delicious snacks".to_string(),
            rating: 4.3,
            delivery_time: "10-15 min".to_string(),
            menu: vec![
                category(
                    "coffee",
                    &[
                        ("Filter Coffee", 25.0),
                        ("Cappuccino", 60.0),
                        ("Latte", 70.0),
                        ("Espresso", 50.0),
                        ("Americano", 55.0),
                        ("Mocha", 75.0),
                    ],
                ),
                category(
                    "tea",
                    &[
                        ("Regular Tea", 15.0),
                        ("Green Tea", 30.0),
                        ("Masala Chai", 25.0),
                        ("Herbal Tea", 35.0),
                        ("Lemon Tea", 30.0),
                    ],
                ),
                category(
                    "cold beverages",
                    &[
                        ("Cold Coffee", 65.0),
                        ("Milk Shake", 80.0),
                        ("Smoothie", 90.0),
                        ("Iced Tea", 45.0),
                        ("Fresh Juice", 60.0),
                    ],
                ),
                category(
                    "snacks",
                    &[
                        ("Veg Sandwich", 50.0),
                        ("Grilled Sandwich", 65.0),
                        ("Burger", 75.0),
                        ("Pizza Slice", 85.0),
                        ("Cake", 45.0),
                        ("Cookies", 30.0),
                    ],
                ),
            ],
        },
        Restaurant {
            id: "radha_krishna".to_string(),
            name: "Radha Krishna".to_string(),
            image: "radha_krishna.jpg".to_string(),
            description: "Multi-cuisine restaurant offering South Indian, North Indian, and Chinese dishes".to_string(),
            rating: 4.4,
            delivery_time: "20-25 min".to_string(),
            menu: vec![
                category(
                    "south indian",
                    &[
                        ("Ghee Roast Dosa", 65.0),
                        ("Onion Uttapam", 55.0),
                        ("Rava Dosa", 50.0),
                        ("Pesarattu", 45.0),
                        ("Set Dosa", 40.0),
                    ],
                ),
                category(
                    "north indian",
                    &[
                        ("Paneer Butter Masala", 120.0),
                        ("Chole Bhature", 80.0),
                        ("Dal Makhani", 90.0),
                        ("Naan", 25.0),
                        ("Roti", 15.0),
                    ],
                ),
                category(
                    "chinese",
                    &[
                        ("Noodles", 70.0),
                        ("Fried Rice", 65.0),
                        ("Manchurian", 85.0),
                        ("Spring Rolls", 60.0),
                        ("Schezwan Rice", 75.0),
                    ],
                ),
                category(
                    "beverages",
                    &[
                        ("Fresh Lime", 30.0),
                        ("Mint Mojito", 50.0),
                        ("Falooda", 80.0),
                        ("Badam Milk", 45.0),
                        ("Rose Milk", 35.0),
                    ],
                ),
            ],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_restaurant() {
        let restaurant = find("main_canteen").unwrap();
        assert_eq!(restaurant.name, "Nalambagam Canteen");
        assert!(restaurant.menu.iter().any(|c| c.name == "beverages"));
    }

    #[test]
    fn find_unknown_restaurant() {
        assert!(find("midnight_biryani").is_none());
    }

    #[test]
    fn all_prices_are_positive() {
        for restaurant in all() {
            for category in &restaurant.menu {
                for item in &category.items {
                    assert!(item.price > 0.0, "{} is free", item.name);
                }
            }
        }
    }
}
