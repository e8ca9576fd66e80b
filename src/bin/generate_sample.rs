use std::error::Error;

const HEADER: [&str; 10] = [
    "VNO",
    "Month",
    "Week",
    "Branch",
    "Bill Amount",
    "BILL TYPE",
    "Act. Weight(Main)",
    "Load Type",
    "Consignment Freight Amount",
    "Consignor",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    let months = [("Apr", 14), ("May", 18), ("Jun", 22)];
    let branches = ["Ahmedabad", "Chennai", "Kolkata", "Pune"];
    let load_types = ["Bag", "Bulk"];
    let consignors = ["Acme Cement", "Bharat Steel", "Delta Agro", "Sunrise Fertilisers"];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(HEADER)?;

    let mut movement_no = 1000;
    let mut rows = 0;
    for (month, first_week) in months {
        for week in first_week..first_week + 4 {
            for branch in branches {
                let movements = 3 + (rng.next_u64() % 6) as usize;
                for _ in 0..movements {
                    movement_no += 1;
                    let vno = format!("V{movement_no}");
                    // A movement is often split over several consignment lines.
                    let lines = 1 + (rng.next_u64() % 3) as usize;
                    for _ in 0..lines {
                        let freight = rng.range(20_000.0, 250_000.0).round();
                        let roll = rng.next_f64();
                        let (bill_amount, bill_type) = if roll < 0.15 {
                            (String::new(), "")
                        } else if roll < 0.25 {
                            ("0".to_string(), "Freight")
                        } else if roll < 0.80 {
                            (format!("{freight}"), "Freight")
                        } else {
                            let extra = rng.range(2_000.0, 30_000.0).round();
                            (format!("{extra}"), rng.pick(&["Detention", "Loading", "Other"]))
                        };
                        let weight = format!("{:.2}", rng.range(5.0, 40.0));
                        let week_label = week.to_string();
                        let freight_amount = format!("{freight}");

                        writer.write_record([
                            vno.as_str(),
                            month,
                            week_label.as_str(),
                            branch,
                            bill_amount.as_str(),
                            bill_type,
                            weight.as_str(),
                            rng.pick(&load_types),
                            freight_amount.as_str(),
                            rng.pick(&consignors),
                        ])?;
                        rows += 1;
                    }
                }
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} rows ({} movements) to {output_path}", movement_no - 1000);
    Ok(())
}
