//! Pitch conversion — note names and frequencies to semitone numbers.

/// Parse a note name string into a MIDI note number.
///
/// Format: `<letter><optional accidental><octave>`
/// - Letter: C, D, E, F, G, A, B
/// - Accidental: # (sharp) or b (flat)
/// - Octave: -1 to 9 (C4 = middle C = MIDI 60)
pub fn parse_note_name(name: &str) -> Option<u8> {
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let base = match chars[0] {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let mut i = 1;
    let accidental: i32 = if i < chars.len() && chars[i] == '#' {
        i += 1;
        1
    } else if i < chars.len() && chars[i] == 'b' {
        i += 1;
        -1
    } else {
        0
    };

    // Rest should be octave number (possibly negative)
    let octave_str: String = chars[i..].iter().collect();
    let octave: i32 = octave_str.parse().ok()?;

    // MIDI note = (octave + 1) * 12 + base + accidental
    // C-1 = 0, C4 = 60, A4 = 69
    let midi = (octave + 1) * 12 + base + accidental;

    if !(0..=127).contains(&midi) {
        None
    } else {
        Some(midi as u8)
    }
}

/// Convert a frequency in Hz to a (fractional) MIDI pitch number.
///
/// A4 = 440 Hz = 69. Non-positive frequencies map to 0.
pub fn freq_to_pitch(freq: f64) -> f64 {
    if freq <= 0.0 {
        return 0.0;
    }
    69.0 + 12.0 * (freq / 440.0).log2()
}
