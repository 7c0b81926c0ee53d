use tempora::{
    complement_within, intersect_all, CalendarWeek, DateInterval, MachineTime, Moment,
    MomentInterval, PlainDate, TimeUnit, TimestampInterval,
};

fn main() -> Result<(), tempora::TimeError> {
    // A working year and its holidays.
    let year: DateInterval = "[2024-01-01/2024-12-31]".parse()?;
    let holidays: Vec<DateInterval> = ["[2024-04-01/04-05]", "[2024-08-05/08-23]", "2024-12-23/12-31"]
        .iter()
        .map(|s| s.parse())
        .collect::<Result<_, _>>()?;

    println!("year:     {year} ({} days)", year.length_in_days()?);
    let working = complement_within(&year, &holidays);
    for iv in &working {
        println!("working:  {iv} ({} days)", iv.length_in_days()?);
    }

    let week: CalendarWeek = "2024-W14".parse()?;
    let overlap = intersect_all(&[week.to_interval()], &holidays);
    println!("{week} holidays: {}", overlap.first().map_or(0, |iv| iv.length_in_days().unwrap_or(0)));

    let shift: TimestampInterval = "2024-03-31T22:00/2024-04-01T06:00".parse()?;
    println!("shift:    {shift}, {} h", shift.duration_in(tempora::ClockUnit::Hours)?);

    let leaps = tempora::LeapSeconds::shared();
    let day = DateInterval::closed(PlainDate::of(2016, 12, 31)?, PlainDate::of(2016, 12, 31)?)?;
    let utc = day.to_full_days()?.at_utc()?;
    println!(
        "{utc}: {} POSIX, {}",
        utc.simple_duration()?,
        utc.real_duration(&leaps)?
    );

    let hour = MachineTime::of(1, TimeUnit::Hours)?;
    let around = MomentInterval::surrounding(Moment::now(), hour, 0.5, &leaps)?;
    println!("now ± 30 min: {around}");
    Ok(())
}
