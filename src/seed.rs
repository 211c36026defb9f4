//! One-time seeding of the read-only reference catalogs. Runs at startup
//! and is a no-op once the cities table has rows.

use tracing::info;
use uuid::Uuid;

use crate::{db::DbPool, error::AppError};

struct CitySeed {
    name: &'static str,
    country: &'static str,
    region: &'static str,
    cost_index: i64,
    popularity: i64,
    description: &'static str,
    image_url: &'static str,
    activities: &'static [ActivitySeed],
}

struct ActivitySeed {
    name: &'static str,
    category: &'static str,
    cost: f64,
    duration: &'static str,
    description: &'static str,
}

pub async fn seed_reference_data(db: &DbPool) -> Result<(), AppError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cities")
        .fetch_one(db)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let mut activity_count = 0usize;
    for city in CITIES {
        let city_id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO cities (id, name, country, region, cost_index, popularity,
                                 description, image_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&city_id)
        .bind(city.name)
        .bind(city.country)
        .bind(city.region)
        .bind(city.cost_index)
        .bind(city.popularity)
        .bind(city.description)
        .bind(city.image_url)
        .execute(db)
        .await?;

        for activity in city.activities {
            sqlx::query(
                "INSERT INTO activities (id, name, city_id, category, cost, duration,
                                         description, image_url)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(activity.name)
            .bind(&city_id)
            .bind(activity.category)
            .bind(activity.cost)
            .bind(activity.duration)
            .bind(activity.description)
            .bind(city.image_url)
            .execute(db)
            .await?;
            activity_count += 1;
        }
    }

    info!(
        "seeded {} cities and {} activities",
        CITIES.len(),
        activity_count
    );
    Ok(())
}

const CITIES: &[CitySeed] = &[
    CitySeed {
        name: "Paris",
        country: "France",
        region: "Europe",
        cost_index: 85,
        popularity: 95,
        description: "The City of Light, known for its art, culture, and cuisine",
        image_url: "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=800",
        activities: &[
            ActivitySeed {
                name: "Eiffel Tower Visit",
                category: "Sightseeing",
                cost: 25.0,
                duration: "2-3 hours",
                description: "Iconic landmark with breathtaking views",
            },
            ActivitySeed {
                name: "Louvre Museum Tour",
                category: "Culture",
                cost: 17.0,
                duration: "3-4 hours",
                description: "World's largest art museum",
            },
            ActivitySeed {
                name: "Seine River Cruise",
                category: "Sightseeing",
                cost: 15.0,
                duration: "1 hour",
                description: "Romantic boat ride through Paris",
            },
            ActivitySeed {
                name: "Montmartre Walking Tour",
                category: "Culture",
                cost: 30.0,
                duration: "2-3 hours",
                description: "Explore historic artist quarter",
            },
        ],
    },
    CitySeed {
        name: "Tokyo",
        country: "Japan",
        region: "Asia",
        cost_index: 80,
        popularity: 90,
        description: "A vibrant metropolis blending tradition and modernity",
        image_url: "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800",
        activities: &[
            ActivitySeed {
                name: "Tokyo Skytree",
                category: "Sightseeing",
                cost: 20.0,
                duration: "2 hours",
                description: "Tallest structure in Japan",
            },
            ActivitySeed {
                name: "Sushi Making Class",
                category: "Food & Dining",
                cost: 80.0,
                duration: "3 hours",
                description: "Learn authentic sushi preparation",
            },
            ActivitySeed {
                name: "Sensoji Temple Visit",
                category: "Culture",
                cost: 0.0,
                duration: "1-2 hours",
                description: "Ancient Buddhist temple",
            },
            ActivitySeed {
                name: "Shibuya Crossing Tour",
                category: "Sightseeing",
                cost: 15.0,
                duration: "2 hours",
                description: "Experience the world's busiest intersection",
            },
        ],
    },
    CitySeed {
        name: "New York",
        country: "USA",
        region: "North America",
        cost_index: 90,
        popularity: 92,
        description: "The city that never sleeps, center of culture and finance",
        image_url: "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=800",
        activities: &[
            ActivitySeed {
                name: "Statue of Liberty",
                category: "Sightseeing",
                cost: 25.0,
                duration: "3-4 hours",
                description: "Iconic American symbol",
            },
            ActivitySeed {
                name: "Central Park Tour",
                category: "Nature",
                cost: 0.0,
                duration: "2-3 hours",
                description: "Urban oasis in Manhattan",
            },
            ActivitySeed {
                name: "Broadway Show",
                category: "Entertainment",
                cost: 150.0,
                duration: "2-3 hours",
                description: "World-class theater experience",
            },
            ActivitySeed {
                name: "Empire State Building",
                category: "Sightseeing",
                cost: 42.0,
                duration: "2 hours",
                description: "Legendary skyscraper with panoramic views",
            },
        ],
    },
    CitySeed {
        name: "Barcelona",
        country: "Spain",
        region: "Europe",
        cost_index: 70,
        popularity: 88,
        description: "Mediterranean paradise with stunning architecture",
        image_url: "https://images.unsplash.com/photo-1583422409516-2895a77efded?w=800",
        activities: &[
            ActivitySeed {
                name: "Sagrada Familia Tour",
                category: "Culture",
                cost: 26.0,
                duration: "2 hours",
                description: "Gaudi's masterpiece basilica",
            },
            ActivitySeed {
                name: "Park Güell Visit",
                category: "Sightseeing",
                cost: 10.0,
                duration: "2 hours",
                description: "Colorful park with mosaic art",
            },
            ActivitySeed {
                name: "Tapas Food Tour",
                category: "Food & Dining",
                cost: 60.0,
                duration: "3 hours",
                description: "Authentic Spanish cuisine experience",
            },
            ActivitySeed {
                name: "Gothic Quarter Walk",
                category: "Culture",
                cost: 20.0,
                duration: "2 hours",
                description: "Medieval streets and architecture",
            },
        ],
    },
    CitySeed {
        name: "Bali",
        country: "Indonesia",
        region: "Asia",
        cost_index: 40,
        popularity: 85,
        description: "Tropical paradise with beautiful beaches and temples",
        image_url: "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=800",
        activities: &[
            ActivitySeed {
                name: "Ubud Rice Terraces",
                category: "Nature",
                cost: 5.0,
                duration: "2-3 hours",
                description: "Stunning emerald landscapes",
            },
            ActivitySeed {
                name: "Tanah Lot Temple",
                category: "Culture",
                cost: 3.0,
                duration: "1-2 hours",
                description: "Sea temple at sunset",
            },
            ActivitySeed {
                name: "Surfing Lesson",
                category: "Adventure",
                cost: 35.0,
                duration: "2 hours",
                description: "Learn to surf in paradise",
            },
            ActivitySeed {
                name: "Balinese Cooking Class",
                category: "Food & Dining",
                cost: 40.0,
                duration: "4 hours",
                description: "Traditional Indonesian cuisine",
            },
        ],
    },
    CitySeed {
        name: "London",
        country: "UK",
        region: "Europe",
        cost_index: 95,
        popularity: 93,
        description: "Historic capital with world-class museums and culture",
        image_url: "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?w=800",
        activities: &[
            ActivitySeed {
                name: "Tower of London",
                category: "Culture",
                cost: 32.0,
                duration: "3 hours",
                description: "Historic castle and crown jewels",
            },
            ActivitySeed {
                name: "British Museum",
                category: "Culture",
                cost: 0.0,
                duration: "2-3 hours",
                description: "World cultures and history",
            },
            ActivitySeed {
                name: "Thames River Cruise",
                category: "Sightseeing",
                cost: 18.0,
                duration: "1 hour",
                description: "See landmarks from the water",
            },
            ActivitySeed {
                name: "Afternoon Tea Experience",
                category: "Food & Dining",
                cost: 45.0,
                duration: "2 hours",
                description: "Traditional British tea service",
            },
        ],
    },
    CitySeed {
        name: "Dubai",
        country: "UAE",
        region: "Middle East",
        cost_index: 85,
        popularity: 87,
        description: "Futuristic city with luxury shopping and architecture",
        image_url: "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?w=800",
        activities: &[
            ActivitySeed {
                name: "Burj Khalifa Observation",
                category: "Sightseeing",
                cost: 40.0,
                duration: "2 hours",
                description: "World's tallest building",
            },
            ActivitySeed {
                name: "Desert Safari",
                category: "Adventure",
                cost: 70.0,
                duration: "6 hours",
                description: "Dune bashing and BBQ dinner",
            },
            ActivitySeed {
                name: "Dubai Mall Shopping",
                category: "Shopping",
                cost: 0.0,
                duration: "3-4 hours",
                description: "Luxury shopping paradise",
            },
            ActivitySeed {
                name: "Gold Souk Visit",
                category: "Shopping",
                cost: 0.0,
                duration: "1-2 hours",
                description: "Traditional gold market",
            },
        ],
    },
    CitySeed {
        name: "Sydney",
        country: "Australia",
        region: "Oceania",
        cost_index: 88,
        popularity: 86,
        description: "Harbor city with iconic landmarks and beaches",
        image_url: "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?w=800",
        activities: &[
            ActivitySeed {
                name: "Opera House Tour",
                category: "Culture",
                cost: 25.0,
                duration: "1 hour",
                description: "Iconic architectural marvel",
            },
            ActivitySeed {
                name: "Harbour Bridge Climb",
                category: "Adventure",
                cost: 250.0,
                duration: "3 hours",
                description: "Climb the famous bridge",
            },
            ActivitySeed {
                name: "Bondi Beach",
                category: "Nature",
                cost: 0.0,
                duration: "3-4 hours",
                description: "Famous surf beach",
            },
            ActivitySeed {
                name: "Taronga Zoo",
                category: "Entertainment",
                cost: 50.0,
                duration: "4 hours",
                description: "Wildlife with harbour views",
            },
        ],
    },
    CitySeed {
        name: "Rome",
        country: "Italy",
        region: "Europe",
        cost_index: 75,
        popularity: 91,
        description: "Ancient city with remarkable history and cuisine",
        image_url: "https://images.unsplash.com/photo-1552832230-c0197dd311b5?w=800",
        activities: &[
            ActivitySeed {
                name: "Colosseum Tour",
                category: "Culture",
                cost: 16.0,
                duration: "2 hours",
                description: "Ancient Roman amphitheater",
            },
            ActivitySeed {
                name: "Vatican Museums",
                category: "Culture",
                cost: 17.0,
                duration: "3 hours",
                description: "Sistine Chapel and art treasures",
            },
            ActivitySeed {
                name: "Trevi Fountain Visit",
                category: "Sightseeing",
                cost: 0.0,
                duration: "30 min",
                description: "Baroque masterpiece",
            },
            ActivitySeed {
                name: "Food Tour in Trastevere",
                category: "Food & Dining",
                cost: 55.0,
                duration: "3 hours",
                description: "Authentic Roman cuisine",
            },
        ],
    },
    CitySeed {
        name: "Bangkok",
        country: "Thailand",
        region: "Asia",
        cost_index: 35,
        popularity: 84,
        description: "Bustling city with vibrant street life and temples",
        image_url: "https://images.unsplash.com/photo-1508009603885-50cf7c579365?w=800",
        activities: &[
            ActivitySeed {
                name: "Grand Palace",
                category: "Culture",
                cost: 15.0,
                duration: "2-3 hours",
                description: "Ornate royal complex",
            },
            ActivitySeed {
                name: "Floating Market Tour",
                category: "Sightseeing",
                cost: 25.0,
                duration: "3 hours",
                description: "Traditional market on water",
            },
            ActivitySeed {
                name: "Thai Massage",
                category: "Entertainment",
                cost: 20.0,
                duration: "1-2 hours",
                description: "Authentic relaxation",
            },
            ActivitySeed {
                name: "Street Food Tour",
                category: "Food & Dining",
                cost: 30.0,
                duration: "3 hours",
                description: "Explore Bangkok's food scene",
            },
        ],
    },
];
