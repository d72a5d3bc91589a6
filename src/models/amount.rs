// ============================================================================
// AMOUNT - Aritmética decimal de la simulación (4 decimales)
// ============================================================================

/// Lamports por SOL (conversión del balance RPC)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

const SCALE: f64 = 10_000.0;

/// Normalizar un valor a 4 decimales (precisión de almacenamiento)
pub fn round4(value: f64) -> f64 {
    (value * SCALE).round() / SCALE
}

/// Formatear con exactamente 4 decimales
pub fn format_amount(value: f64) -> String {
    format!("{:.4}", value)
}

/// Convertir lamports a SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Parsear el texto del input de stake.
/// Retorna None si no es un número finito estrictamente positivo.
pub fn parse_positive_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => None,
    }
}
