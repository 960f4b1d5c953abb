//! Static clinic vocabulary: animal types, breed catalog, family traits.

use super::pet::FamilyType;

/// Sentinel entry closing every breed list: lets the UI fall back to a
/// free-text input.
pub const MANUAL_BREED: &str = "Escribir manualmente";

/// Canonical dog breeds offered by the registration form.
pub const DOG_BREEDS: &[&str] = &[
    "Labrador Retriever",
    "Golden Retriever",
    "Pastor Alemán",
    "Bulldog Francés",
    "Beagle",
    "Poodle",
    "Rottweiler",
    "Yorkshire Terrier",
    "Chihuahua",
    "Husky Siberiano",
    "Border Collie",
    "Doberman",
    "Boxer",
    "Maltés",
    "Shih Tzu",
    "Pomerania",
    "Dálmata",
    "San Bernardo",
    "Mastín",
    MANUAL_BREED,
];

/// Canonical cat breeds.
pub const CAT_BREEDS: &[&str] = &[
    "Persa",
    "Siamés",
    "Maine Coon",
    "Ragdoll",
    "British Shorthair",
    "Sphynx",
    "Bengalí",
    "Abisinio",
    "Siberiano",
    "Birmano",
    "Scottish Fold",
    "Devon Rex",
    "Cornish Rex",
    "Oriental",
    "Bombay",
    "Himalayo",
    "Angora Turco",
    "Manx",
    "Somalí",
    "Tonkinés",
    MANUAL_BREED,
];

/// Canonical bird breeds.
pub const BIRD_BREEDS: &[&str] = &[
    "Canario",
    "Periquito",
    "Cockatiel",
    "Agapornis",
    "Diamante Mandarín",
    "Pinzón Cebra",
    "Jilguero",
    "Ruiseñor",
    "Cardenal",
    "Azulejo",
    "Cacatúa",
    "Guacamayo",
    "Loro Gris Africano",
    "Perico Australiano",
    "Ninfa",
    "Cotorra",
    "Tucán",
    "Colibrí",
    "Pavo Real",
    MANUAL_BREED,
];

/// Canonical reptile breeds.
pub const REPTILE_BREEDS: &[&str] = &[
    "Dragón Barbudo",
    "Gecko Leopardo",
    "Iguana Verde",
    "Camaleón",
    "Tortuga de Agua",
    "Tortuga Terrestre",
    "Serpiente de Maíz",
    "Pitón Real",
    "Anolis",
    "Escinco de Lengua Azul",
    "Uromastyx",
    "Tegu",
    "Monstruo de Gila",
    "Dragón de Agua",
    "Basilisco",
    "Camaleón Pantera",
    "Gecko Crestado",
    "Serpiente Rey",
    MANUAL_BREED,
];

/// Unknown animal types only get the manual-entry sentinel.
const FALLBACK_BREEDS: &[&str] = &[MANUAL_BREED];

/// Display label for an animal type. Unknown types get a generic label.
pub fn type_display_name(kind: &str) -> &'static str {
    match kind {
        "dog" => "Perro",
        "cat" => "Gato",
        "bird" => "Ave",
        "reptile" => "Reptil",
        _ => "Animal",
    }
}

/// Family classification: dogs and cats are domestic, everything else exotic.
pub fn family_for_type(kind: &str) -> FamilyType {
    match kind {
        "dog" | "cat" => FamilyType::Domestic,
        _ => FamilyType::Exotic,
    }
}

/// Breed list for an animal type, always ending in [`MANUAL_BREED`].
pub fn breeds_for_type(kind: &str) -> &'static [&'static str] {
    match kind {
        "dog" => DOG_BREEDS,
        "cat" => CAT_BREEDS,
        "bird" => BIRD_BREEDS,
        "reptile" => REPTILE_BREEDS,
        _ => FALLBACK_BREEDS,
    }
}

/// Care characteristics shown per family on the registration wizard.
pub fn family_characteristics(family: FamilyType) -> &'static [&'static str] {
    match family {
        FamilyType::Domestic => &["Compañía", "Protección", "Entretenimiento", "Terapia"],
        FamilyType::Exotic => &["Colección", "Educación", "Conservación", "Investigación"],
    }
}
