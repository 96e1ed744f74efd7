// src/models.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Rodzaj publikacji wybierany na ekranie wyboru.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ListingKind {
    Producto,
    Servicio,
}

impl ListingKind {
    /// Ścieżka endpointu względem bazowego URL API.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ListingKind::Producto => "/productos",
            ListingKind::Servicio => "/servicios",
        }
    }

    pub fn plural_noun(&self) -> &'static str {
        match self {
            ListingKind::Producto => "productos",
            ListingKind::Servicio => "servicios",
        }
    }

    pub fn idle_label(&self) -> &'static str {
        match self {
            ListingKind::Producto => "📤 Publicar Producto",
            ListingKind::Servicio => "📤 Publicar Servicio",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ListingKind::Producto => "¡Producto publicado exitosamente!",
            ListingKind::Servicio => "¡Servicio publicado exitosamente!",
        }
    }

    pub fn failure_fallback(&self) -> &'static str {
        match self {
            ListingKind::Producto => "Error al publicar el producto",
            ListingKind::Servicio => "Error al publicar el servicio",
        }
    }

    /// Minimalna liczba zdjęć wymagana przy publikacji.
    pub fn min_images(&self) -> usize {
        match self {
            ListingKind::Producto => 1,
            ListingKind::Servicio => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum ProductCategory {
    #[strum(serialize = "Electrónica")]
    Electronica,
    #[strum(serialize = "Ropa y Accesorios")]
    RopaAccesorios,
    #[strum(serialize = "Hogar y Jardín")]
    HogarJardin,
    Deportes,
    #[strum(serialize = "Vehículos")]
    Vehiculos,
    #[strum(serialize = "Libros y Música")]
    LibrosMusica,
    Juguetes,
    Servicios,
    Otros,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Province {
    Azuay,
    #[strum(serialize = "Bolívar")]
    Bolivar,
    #[strum(serialize = "Cañar")]
    Canar,
    Carchi,
    Chimborazo,
    Cotopaxi,
    #[strum(serialize = "El Oro")]
    ElOro,
    Esmeraldas,
    #[strum(serialize = "Galápagos")]
    Galapagos,
    Guayas,
    Imbabura,
    Loja,
    #[strum(serialize = "Los Ríos")]
    LosRios,
    #[strum(serialize = "Manabí")]
    Manabi,
    #[strum(serialize = "Morona Santiago")]
    MoronaSantiago,
    Napo,
    Orellana,
    Pastaza,
    Pichincha,
    #[strum(serialize = "Santa Elena")]
    SantaElena,
    #[strum(serialize = "Santo Domingo de los Tsáchilas")]
    SantoDomingo,
    #[strum(serialize = "Sucumbíos")]
    Sucumbios,
    Tungurahua,
    #[strum(serialize = "Zamora Chinchipe")]
    ZamoraChinchipe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum ProductCondition {
    Nuevo,
    #[strum(serialize = "Como Nuevo")]
    ComoNuevo,
    #[strum(serialize = "Usado - En buen estado")]
    UsadoBuenEstado,
    #[strum(serialize = "Usado - Con detalles")]
    UsadoConDetalles,
    #[strum(serialize = "Reacondicionado / Refurbished")]
    Reacondicionado,
    #[strum(serialize = "Para repuestos / No funcional")]
    ParaRepuestos,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum ServiceCategory {
    Mantenimiento,
    #[strum(serialize = "Educación")]
    Educacion,
    Belleza,
    #[strum(serialize = "Tecnología")]
    Tecnologia,
    Transporte,
    #[strum(serialize = "Diseño / Creativo")]
    DisenoCreativo,
    #[strum(serialize = "Salud y Bienestar")]
    SaludBienestar,
    Eventos,
    Limpieza,
    Reparaciones,
    #[strum(serialize = "Consultoría")]
    Consultoria,
    Otros,
}

/// Sposób wyceny usługi. Wartości odpowiadają polom formularza (`tipoPrecio`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PriceType {
    Fijo,
    Desde,
    Negociable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    Presencial,
    Domicilio,
    Local,
    Virtual,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DurationUnit {
    Hora,
    Dia,
    Proyecto,
    Evento,
    Clase,
}

/// Dni tygodnia w kolejności kanonicznej (poniedziałek pierwszy).
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
pub enum Weekday {
    Lunes,
    Martes,
    #[strum(serialize = "Miércoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[strum(serialize = "Sábado")]
    Sabado,
    Domingo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn vocabularies_have_expected_sizes() {
        assert_eq!(ProductCategory::iter().count(), 9);
        assert_eq!(Province::iter().count(), 24);
        assert_eq!(ProductCondition::iter().count(), 6);
        assert_eq!(ServiceCategory::iter().count(), 12);
        assert_eq!(PriceType::iter().count(), 3);
        assert_eq!(Modality::iter().count(), 4);
        assert_eq!(DurationUnit::iter().count(), 5);
        assert_eq!(Weekday::iter().count(), 7);
    }

    #[test]
    fn display_matches_form_values() {
        assert_eq!(PriceType::Negociable.to_string(), "negociable");
        assert_eq!(Modality::Virtual.to_string(), "virtual");
        assert_eq!(DurationUnit::Dia.to_string(), "dia");
        assert_eq!(Weekday::Miercoles.to_string(), "Miércoles");
        assert_eq!(Province::SantoDomingo.to_string(), "Santo Domingo de los Tsáchilas");
        assert_eq!(
            ProductCondition::from_str("Usado - Con detalles").unwrap(),
            ProductCondition::UsadoConDetalles
        );
    }

    #[test]
    fn listing_kind_endpoints() {
        assert_eq!(ListingKind::Producto.endpoint(), "/productos");
        assert_eq!(ListingKind::Servicio.endpoint(), "/servicios");
        assert_eq!(ListingKind::from_str("Servicio").unwrap(), ListingKind::Servicio);
    }
}
