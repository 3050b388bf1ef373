//! Grid rendering of the probability matrix.

use dice_duel_core::{DicePool, ProbabilityMatrix};

const CORNER: &str = "User dice v";

/// Rows are the user's die, columns the opponent's
pub fn render(pool: &DicePool, matrix: &ProbabilityMatrix) -> String {
    let labels: Vec<String> = pool.iter().map(ToString::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(labels.len() + 1);
    rows.push(
        std::iter::once(CORNER.to_string())
            .chain(labels.iter().cloned())
            .collect(),
    );
    for (label, cells) in labels.iter().zip(matrix.rows()) {
        rows.push(
            std::iter::once(label.clone())
                .chain(cells.iter().map(ToString::to_string))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|c| rows.iter().map(|r| r[c].len()).max().unwrap_or(0))
        .collect();

    let rule = |fill: char| {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| fill.to_string().repeat(w + 2))
            .collect();
        format!("+{}+", segments.join("+"))
    };

    let mut out = Vec::with_capacity(rows.len() * 2 + 1);
    out.push(rule('-'));
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:<w$} ", cell, w = *w))
            .collect();
        out.push(format!("|{}|", cells.join("|")));
        out.push(rule(if i == 0 { '=' } else { '-' }));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_classic_triple() {
        let pool = DicePool::parse(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let matrix = ProbabilityMatrix::compute(&pool);
        let table = render(&pool, &matrix);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[1],
            "| User dice v | 2,2,4,4,9,9 | 1,1,6,6,8,8 | 3,3,5,5,7,7 |"
        );
        assert!(lines[2].starts_with("+====="));
        assert_eq!(
            lines[3],
            "| 2,2,4,4,9,9 | -------     | 0.5556      | 0.4444      |"
        );
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }
}
