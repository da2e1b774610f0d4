//! Person-name generation and the bounded unique-name loop.

use std::collections::HashSet;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GenError;

/// Anything that can produce one candidate person name per call. Repeats are allowed;
/// [`generate_unique_names`] takes care of uniqueness.
pub trait NameSource {
    fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;
}

const GIVEN_NAMES: &[&str] = &[
    "Antonio", "José", "Manuel", "Francisco", "David", "Juan", "Javier", "Daniel", "José Antonio",
    "Francisco Javier", "José Luis", "Carlos", "Jesús", "Alejandro", "Miguel", "José Manuel",
    "Rafael", "Pablo", "Pedro", "Ángel", "Sergio", "Fernando", "Jorge", "Luis", "Alberto",
    "Álvaro", "Adrián", "Diego", "Raúl", "Enrique", "Ramón", "Vicente", "Iván", "Rubén", "Óscar",
    "Andrés", "Joaquín", "Santiago", "Eduardo", "Víctor", "Roberto", "Jaime", "Mario", "Ignacio",
    "Alfonso", "Salvador", "Ricardo", "Marcos", "Jordi", "Emilio", "Julián", "Julio", "Guillermo",
    "Gabriel", "Tomás", "Agustín", "Hugo", "Martín", "Nicolás", "Gonzalo", "María Carmen", "María",
    "Carmen", "Ana María", "Laura", "María Pilar", "Isabel", "María Dolores", "Josefa", "Ana",
    "Cristina", "Marta", "María Teresa", "Lucía", "Francisca", "Antonia", "Dolores", "Sara",
    "Paula", "Elena", "María Ángeles", "Raquel", "Rosa María", "Manuela", "Pilar", "Concepción",
    "Mercedes", "Julia", "Beatriz", "Nuria", "Silvia", "Irene", "Alba", "Patricia", "Andrea",
    "Rocío", "Montserrat", "Rosario", "Mónica", "Teresa", "Encarnación", "Alicia", "Sonia",
    "Sandra", "Marina", "Susana", "Yolanda", "Natalia", "Margarita", "Eva", "Inmaculada", "Claudia",
    "Ángela", "Sofía", "Noelia", "Verónica", "Nerea", "Begoña", "Inés", "Lorena",
];

const SURNAMES: &[&str] = &[
    "García", "Rodríguez", "González", "Fernández", "López", "Martínez", "Sánchez", "Pérez",
    "Gómez", "Martín", "Jiménez", "Ruiz", "Hernández", "Díaz", "Moreno", "Muñoz", "Álvarez",
    "Romero", "Alonso", "Gutiérrez", "Navarro", "Torres", "Domínguez", "Vázquez", "Ramos", "Gil",
    "Ramírez", "Serrano", "Blanco", "Molina", "Morales", "Suárez", "Ortega", "Delgado", "Castro",
    "Ortiz", "Rubio", "Marín", "Sanz", "Núñez", "Iglesias", "Medina", "Garrido", "Cortés",
    "Castillo", "Santos", "Lozano", "Guerrero", "Cano", "Prieto", "Méndez", "Cruz", "Calvo",
    "Gallego", "Vidal", "León", "Márquez", "Herrera", "Peña", "Flores", "Cabrera", "Campos",
    "Vega", "Fuentes", "Carrasco", "Diez", "Caballero", "Reyes", "Nieto", "Aguilar", "Pascual",
    "Santana", "Herrero", "Lorenzo", "Montero", "Hidalgo", "Giménez", "Ibáñez", "Ferrer", "Durán",
    "Santiago", "Benítez", "Mora", "Vicente", "Vargas", "Arias", "Carmona", "Crespo", "Román",
    "Pastor", "Soto", "Sáez", "Velasco", "Moya", "Soler", "Parra", "Esteban", "Bravo", "Gallardo",
    "Rojas",
];

/// Spanish-style names: a given name followed by one or two surnames.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpanishNames;

impl SpanishNames {
    /// Number of distinct names this source can produce.
    #[must_use]
    pub fn vocabulary_size() -> usize {
        GIVEN_NAMES.len() * SURNAMES.len() * (SURNAMES.len() + 1)
    }
}

impl NameSource for SpanishNames {
    fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        // Both lists are non-empty constants
        let given = GIVEN_NAMES.choose(rng).copied().unwrap_or_default();
        let first = SURNAMES.choose(rng).copied().unwrap_or_default();
        if rng.gen_bool(0.9) {
            let second = SURNAMES.choose(rng).copied().unwrap_or_default();
            format!("{given} {first} {second}")
        } else {
            format!("{given} {first}")
        }
    }
}

/// Draws names until `n` distinct ones are collected, in first-seen order.
///
/// Every batch asks `source` for exactly the current shortfall. The loop gives up after
/// `max_batches` batches, which bounds the work when the source's vocabulary is smaller than
/// `n`.
///
/// # Errors
/// Errors with [`GenError::ExhaustedUniqueSource`] when `n` distinct names were not reached
/// within `max_batches` batches.
pub fn generate_unique_names<S, R>(
    source: &S,
    rng: &mut R,
    n: usize,
    max_batches: usize,
) -> Result<Vec<String>, GenError>
where
    S: NameSource,
    R: Rng + ?Sized,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(n);
    let mut names = Vec::with_capacity(n);
    let mut batches = 0;

    while names.len() < n {
        if batches == max_batches {
            return Err(GenError::ExhaustedUniqueSource {
                requested: n,
                produced: names.len(),
                batches,
            });
        }
        let shortfall = n - names.len();
        for _ in 0..shortfall {
            let name = source.name(rng);
            if !seen.contains(&name) {
                seen.insert(name.clone());
                names.push(name);
            }
        }
        batches += 1;
        debug!(
            "Name batch {}: requested {}, now {} of {} unique",
            batches,
            shortfall,
            names.len(),
            n
        );
    }

    info!("Generated {} unique names in {} batches", n, batches);
    Ok(names)
}
