/// The 4x4 identity matrix, row-major.
pub const IDENTITY_4X4: [f32; 16] = [
    1f32, 0f32, 0f32, 0f32, //
    0f32, 1f32, 0f32, 0f32, //
    0f32, 0f32, 1f32, 0f32, //
    0f32, 0f32, 0f32, 1f32, //
];

/// Multiplies two row-major 4x4 matrices, `result[i][j] = sum_k a[i][k] * b[k][j]`.
pub fn multiply_4x4(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut result = [0f32; 16];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i * 4 + j] += a[i * 4 + k] * b[k * 4 + j];
            }
        }
    }
    result
}
