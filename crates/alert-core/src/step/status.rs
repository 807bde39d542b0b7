use serde::{Deserialize, Serialize};

/// Estado visible de un paso en la barra lateral.
///
/// Se deriva del estado del flujo con precedencia fija:
/// `Current` > `Completed` > `Skipped` > `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Aún no alcanzado.
    Pending,
    /// Paso activo.
    Current,
    /// Paso ya superado.
    Completed,
    /// Primer paso de la rama no elegida. Nunca se entra en él.
    Skipped,
}
